use super::model::{DayName, MealSlot};

// Rows follow DayName order, columns follow MealSlot order.
const TEMPLATE: [[Option<&str>; 6]; 7] = [
    [
        Some("Omelette with broccoli and herbs"),
        Some("Almonds + apple"),
        Some("Grilled chicken breast + salad + quinoa"),
        Some("Cottage cheese with berries"),
        Some("Baked salmon + braised zucchini and spinach"),
        None,
    ],
    [
        Some("Buckwheat + boiled egg"),
        Some("Unsweetened yogurt + chia"),
        Some("Turkey + vegetable stew"),
        Some("Walnuts + pear"),
        Some("Cod with lemon + cabbage salad"),
        None,
    ],
    [
        Some("Cottage cheese + raspberries + flax seeds"),
        Some("Avocado + half an egg"),
        Some("Braised beef with vegetables"),
        Some("Vegetable sticks + nuts"),
        Some("Steamed chicken patties + cauliflower"),
        None,
    ],
    [
        Some("Mushroom omelette with herbs"),
        Some("Hazelnuts + apple"),
        Some("Broccoli cream soup + chicken breast"),
        Some("Kefir/yogurt"),
        Some("Braised hake + cucumber and spinach salad"),
        None,
    ],
    [
        Some("Sugar-free cottage cheese bake"),
        Some("Pumpkin seeds + pear"),
        Some("Oven-baked turkey + salad + bulgur"),
        Some("Yogurt with cinnamon"),
        Some("Salmon steak + roasted vegetables"),
        None,
    ],
    [
        Some("Sugar-free buckwheat pancakes"),
        Some("Avocado + cucumber"),
        Some("Chicken soup with vegetables"),
        Some("Cottage cheese with berries"),
        Some("Baked fish + braised cabbage"),
        None,
    ],
    [
        Some("Omelette with spinach and tomatoes"),
        Some("Almonds + apple"),
        Some("Braised beef with broccoli and cauliflower"),
        Some("Kefir/yogurt"),
        Some("Roasted chicken with zucchini and carrots"),
        None,
    ],
];

/// Default planned meal for a slot, if the weekly plan has one.
pub fn planned_meal(day: DayName, slot: MealSlot) -> Option<&'static str> {
    TEMPLATE[day.index()][slot.index()]
}
