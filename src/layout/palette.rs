use serde::Serialize;

use crate::schedule::Category;

/// Colour and ranking for one category. Lower rank wins when events share
/// a day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub category: Category,
    pub color: String,
    pub rank: u8,
}

/// The category lookup shared by every builder. Keep a single instance
/// and pass it around so colours and ranks can't diverge between views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Palette {
    styles: Vec<CategoryStyle>,
}

impl Palette {
    /// Order categories are listed in legends.
    pub const LEGEND_ORDER: [Category; 6] = [
        Category::Exam,
        Category::Class,
        Category::Assignment,
        Category::Project,
        Category::OfficeHours,
        Category::Other,
    ];

    pub fn style(&self, category: Category) -> &CategoryStyle {
        self.styles
            .iter()
            .find(|s| s.category == category)
            .or_else(|| self.styles.iter().find(|s| s.category == Category::Other))
            .unwrap_or(&self.styles[0])
    }

    pub fn color(&self, category: Category) -> &str {
        &self.style(category).color
    }

    pub fn rank(&self, category: Category) -> u8 {
        self.style(category).rank
    }

    /// Swap the colour of one category.
    pub fn with_color(mut self, category: Category, color: &str) -> Self {
        if let Some(style) = self.styles.iter_mut().find(|s| s.category == category) {
            style.color = color.to_string();
        }
        self
    }
}

impl Default for Palette {
    fn default() -> Self {
        let style = |category, color: &str, rank| CategoryStyle {
            category,
            color: color.to_string(),
            rank,
        };
        Self {
            styles: vec![
                style(Category::Exam, "#d73027", 0),
                style(Category::Class, "#2c7bb6", 1),
                style(Category::Assignment, "#f57c00", 2),
                style(Category::Project, "#f57c00", 2),
                style(Category::OfficeHours, "#1a9850", 3),
                style(Category::Other, "#6e6e6e", 4),
            ],
        }
    }
}
