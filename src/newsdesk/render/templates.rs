//! Template sources and the shared minijinja environment.
//!
//! Templates live as stand-alone files next to this module and are included
//! as string constants. All names end in `.html`, so minijinja escapes every
//! interpolated value unless the template marks it `|safe`. Only rendered
//! fragments and post content are marked safe.

use crate::error::Result;
use chrono::NaiveDate;
use minijinja::Environment;
use once_cell::sync::OnceCell;

pub const CARD_TEMPLATE: &str = include_str!("templates/card.html");
pub const GRID_TEMPLATE: &str = include_str!("templates/grid.html");
pub const FEED_PAGE_TEMPLATE: &str = include_str!("templates/feed_page.html");
pub const ARTICLE_TEMPLATE: &str = include_str!("templates/article.html");
pub const ARTICLE_PAGE_TEMPLATE: &str = include_str!("templates/article_page.html");
pub const ADMIN_LIST_TEMPLATE: &str = include_str!("templates/admin_list.html");
pub const SCRIPTS_TEMPLATE: &str = include_str!("templates/scripts.html");

const TEMPLATES: &[(&str, &str)] = &[
    ("card.html", CARD_TEMPLATE),
    ("grid.html", GRID_TEMPLATE),
    ("feed_page.html", FEED_PAGE_TEMPLATE),
    ("article.html", ARTICLE_TEMPLATE),
    ("article_page.html", ARTICLE_PAGE_TEMPLATE),
    ("admin_list.html", ADMIN_LIST_TEMPLATE),
    ("scripts.html", SCRIPTS_TEMPLATE),
];

static ENV: OnceCell<Environment<'static>> = OnceCell::new();

/// The environment with every template compiled, built on first use.
pub fn environment() -> Result<&'static Environment<'static>> {
    ENV.get_or_try_init(|| {
        let mut env = Environment::new();
        env.add_filter("pubdate", format_date);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(env)
    })
}

/// `2026-03-05` as `March 5, 2026`; anything unparseable is shown as stored.
pub fn format_date(raw: String) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw,
    }
}
