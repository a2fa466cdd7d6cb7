//! Mess Menu Entities
//!
//! The weekly mess menu. Fixture data, never mutated at runtime.

use serde::{Deserialize, Serialize};

use super::week::Weekday;

/// Meal of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One meal's offerings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessMenuItem {
    pub id: String,
    pub meal_type: MealType,
    /// Dishes in serving order
    pub items: Vec<String>,
}

impl MessMenuItem {
    fn fixture(id: &str, meal_type: MealType, items: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            meal_type,
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A full day's menu
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMessMenu {
    pub day: Weekday,
    pub menu: Vec<MessMenuItem>,
}

/// The sample weekly menu (Monday through Friday)
pub fn weekly_menu() -> Vec<DailyMessMenu> {
    vec![
        DailyMessMenu {
            day: Weekday::Monday,
            menu: vec![
                MessMenuItem::fixture("m1", MealType::Breakfast, &["Poha", "Tea/Coffee", "Banana"]),
                MessMenuItem::fixture(
                    "m2",
                    MealType::Lunch,
                    &["Roti", "Dal Makhani", "Rice", "Salad", "Aloo Gobi"],
                ),
                MessMenuItem::fixture(
                    "m3",
                    MealType::Dinner,
                    &["Chapati", "Mixed Veg Curry", "Rice", "Curd"],
                ),
            ],
        },
        DailyMessMenu {
            day: Weekday::Tuesday,
            menu: vec![
                MessMenuItem::fixture("t1", MealType::Breakfast, &["Idli Sambar", "Tea/Coffee"]),
                MessMenuItem::fixture(
                    "t2",
                    MealType::Lunch,
                    &["Roti", "Rajma Chawal", "Salad", "Bhindi Fry"],
                ),
                MessMenuItem::fixture(
                    "t3",
                    MealType::Dinner,
                    &["Paratha", "Paneer Butter Masala", "Rice", "Gulab Jamun"],
                ),
            ],
        },
        DailyMessMenu {
            day: Weekday::Wednesday,
            menu: vec![
                MessMenuItem::fixture(
                    "w1",
                    MealType::Breakfast,
                    &["Aloo Paratha", "Curd", "Tea/Coffee"],
                ),
                MessMenuItem::fixture(
                    "w2",
                    MealType::Lunch,
                    &["Roti", "Chole Bhature", "Rice", "Salad"],
                ),
                MessMenuItem::fixture(
                    "w3",
                    MealType::Dinner,
                    &["Chapati", "Dal Tadka", "Baingan Bharta", "Rice"],
                ),
            ],
        },
        DailyMessMenu {
            day: Weekday::Thursday,
            menu: vec![
                MessMenuItem::fixture("th1", MealType::Breakfast, &["Upma", "Tea/Coffee", "Apple"]),
                MessMenuItem::fixture(
                    "th2",
                    MealType::Lunch,
                    &["Roti", "Vegetable Biryani", "Raita", "Salad"],
                ),
                MessMenuItem::fixture(
                    "th3",
                    MealType::Dinner,
                    &["Chapati", "Matar Paneer", "Rice", "Kheer"],
                ),
            ],
        },
        DailyMessMenu {
            day: Weekday::Friday,
            menu: vec![
                MessMenuItem::fixture(
                    "f1",
                    MealType::Breakfast,
                    &["Bread Omelette/Toast Butter", "Tea/Coffee"],
                ),
                MessMenuItem::fixture(
                    "f2",
                    MealType::Lunch,
                    &["Roti", "Dal Fry", "Aloo Jeera", "Rice", "Salad"],
                ),
                MessMenuItem::fixture(
                    "f3",
                    MealType::Dinner,
                    &["Poori", "Aloo Sabzi", "Rice", "Jalebi"],
                ),
            ],
        },
    ]
}

/// Menu for a day, if the mess publishes one
pub fn menu_for(week: &[DailyMessMenu], day: Weekday) -> Option<&DailyMessMenu> {
    week.iter().find(|d| d.day == day)
}

/// The day tab to open by default: today when published, else the first
/// published day.
pub fn default_day(week: &[DailyMessMenu], today: Weekday) -> Option<Weekday> {
    if menu_for(week, today).is_some() {
        Some(today)
    } else {
        week.first().map(|d| d.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_for_published_day() {
        let week = weekly_menu();
        let monday = menu_for(&week, Weekday::Monday).unwrap();
        assert_eq!(monday.menu.len(), 3);
        assert_eq!(monday.menu[0].meal_type, MealType::Breakfast);
        assert!(monday.menu[0].items.contains(&"Poha".to_string()));
    }

    #[test]
    fn test_default_day_falls_back_to_first() {
        let week = weekly_menu();
        assert_eq!(default_day(&week, Weekday::Wednesday), Some(Weekday::Wednesday));
        assert_eq!(default_day(&week, Weekday::Sunday), Some(Weekday::Monday));
        assert_eq!(default_day(&[], Weekday::Monday), None);
    }
}
