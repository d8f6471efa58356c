use crate::service::RecipePage;
use crate::store::Recipe;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fmt::Write as _;

/// Create a table with the shared look used by every text report
pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

/// Format a page of recipes as a table with a paging summary line
pub fn format_page_text(page: &RecipePage) -> String {
    let mut out = String::new();

    let first = page
        .page
        .saturating_sub(1)
        .saturating_mul(page.limit)
        .saturating_add(1);
    let last = first + page.data.len().saturating_sub(1);
    let summary = if page.data.is_empty() {
        format!("No recipes on page {} ({} total)", page.page, page.total)
    } else {
        format!(
            "Recipes {}-{} of {} (page {}, limit {})",
            first, last, page.total, page.page, page.limit
        )
    };
    let _ = writeln!(out, "{}", summary.bold());

    if page.data.is_empty() {
        return out;
    }

    let mut table = create_styled_table(&[
        "ID", "Title", "Cuisine", "Rating", "Total(min)", "Calories", "Serves",
    ]);
    for recipe in &page.data {
        table.add_row(vec![
            Cell::new(recipe.id),
            Cell::new(truncate_string(&recipe.title, 40)),
            Cell::new(recipe.cuisine.as_deref().unwrap_or("-")),
            Cell::new(format_optional(recipe.rating)),
            Cell::new(format_optional(recipe.total_time)),
            Cell::new(recipe.calories().unwrap_or("-")),
            Cell::new(recipe.serves.as_deref().unwrap_or("-")),
        ]);
    }
    let _ = writeln!(out, "{table}");

    out
}

/// Format one recipe with every field, nutrients included
pub fn format_recipe_text(recipe: &Recipe) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", format!("#{}", recipe.id).cyan(), recipe.title.bold());
    let _ = writeln!(out);

    let mut table = create_styled_table(&["Field", "Value"]);
    table.add_row(vec!["Cuisine", recipe.cuisine.as_deref().unwrap_or("-")]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format_optional(recipe.rating)),
    ]);
    table.add_row(vec![
        Cell::new("Prep time (min)"),
        Cell::new(format_optional(recipe.prep_time)),
    ]);
    table.add_row(vec![
        Cell::new("Cook time (min)"),
        Cell::new(format_optional(recipe.cook_time)),
    ]);
    table.add_row(vec![
        Cell::new("Total time (min)"),
        Cell::new(format_optional(recipe.total_time)),
    ]);
    table.add_row(vec!["Serves", recipe.serves.as_deref().unwrap_or("-")]);
    let _ = writeln!(out, "{table}");

    if let Some(nutrients) = recipe.nutrients.as_ref().filter(|bag| !bag.is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Nutrients".bold().bright_blue());
        let mut table = create_styled_table(&["Nutrient", "Amount"]);
        for (name, amount) in nutrients {
            table.add_row(vec![name.as_str(), amount.as_str()]);
        }
        let _ = writeln!(out, "{table}");
    }

    if !recipe.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Description".bold().bright_blue());
        let _ = writeln!(out, "{}", recipe.description);
    }

    out
}

fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: 42,
            title: "Sweet Potato Pie".to_string(),
            cuisine: Some("Southern Recipes".to_string()),
            rating: Some(4.8),
            prep_time: Some(15),
            cook_time: Some(100),
            total_time: Some(115),
            description: "Shared from a Southern recipe".to_string(),
            nutrients: Some(
                [("calories".to_string(), "389 kcal".to_string())]
                    .into_iter()
                    .collect(),
            ),
            serves: Some("8 servings".to_string()),
        }
    }

    #[test]
    fn test_page_text_contains_rows_and_summary() {
        colored::control::set_override(false);
        let page = RecipePage {
            page: 1,
            limit: 10,
            total: 1,
            data: vec![recipe()],
        };

        let text = format_page_text(&page);
        assert!(text.contains("Recipes 1-1 of 1 (page 1, limit 10)"));
        assert!(text.contains("Sweet Potato Pie"));
        assert!(text.contains("389 kcal"));
    }

    #[test]
    fn test_empty_page_text() {
        colored::control::set_override(false);
        let page = RecipePage {
            page: 3,
            limit: 10,
            total: 12,
            data: vec![],
        };
        assert_eq!(format_page_text(&page), "No recipes on page 3 (12 total)\n");
    }

    #[test]
    fn test_recipe_text_lists_nutrients() {
        colored::control::set_override(false);
        let text = format_recipe_text(&recipe());
        assert!(text.contains("#42 Sweet Potato Pie"));
        assert!(text.contains("Nutrients"));
        assert!(text.contains("Shared from a Southern recipe"));
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a long recipe title", 10), "a long ...");
    }
}
