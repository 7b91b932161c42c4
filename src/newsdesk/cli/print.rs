use chrono::{NaiveDate, Utc};
use colored::Colorize;
use newsdesk::api::{CmdMessage, MessageLevel};
use newsdesk::config::NewsdeskConfig;
use newsdesk::images::{Resolution, ResolutionKind};
use newsdesk::model::{Post, UploadRecord};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 15;
const TIME_WIDTH: usize = 14;
const FEATURED_MARKER: &str = "⭐";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_posts(posts: &[Post]) {
    for post in posts {
        println!("{}", format_post_line(post, Utc::now().date_naive()));
    }
}

fn format_post_line(post: &Post, today: NaiveDate) -> String {
    let id = format!("{:>width$}  ", post.id, width = ID_WIDTH);
    let marker = if post.featured {
        format!("{} ", FEATURED_MARKER)
    } else {
        "   ".to_string()
    };
    let age = match post.published_on() {
        Some(date) => format_age(date, today),
        None => format!(
            "{:>width$}",
            truncate_to_width(&post.date, TIME_WIDTH),
            width = TIME_WIDTH
        ),
    };

    let fixed = id.width() + marker.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&post.title, available);
    let padding = available.saturating_sub(title.width());

    format!(
        "{}{}{}{}{}",
        id.yellow(),
        marker,
        title,
        " ".repeat(padding),
        age.dimmed()
    )
}

pub(super) fn print_uploads(uploads: &[UploadRecord]) {
    for upload in uploads {
        println!(
            "{}  {}  {}",
            upload.path,
            format!("{} bytes", upload.data.len()).dimmed(),
            upload.uploaded_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }
}

pub(super) fn print_resolution(resolution: &Resolution) {
    let label = match resolution.kind {
        ResolutionKind::Placeholder(_) => "placeholder".yellow(),
        ResolutionKind::Upload => "upload".green(),
        ResolutionKind::External => "external".cyan(),
        ResolutionKind::SessionBlob => "blob".normal(),
    };
    println!("{} {}", label, truncate_to_width(&resolution.url, LINE_WIDTH));
}

pub(super) fn print_config(config: &NewsdeskConfig) {
    for (key, value) in config.list_all() {
        println!("{} = {}", key, value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Publish dates have no time of day, so anything from today reads "today".
fn format_age(date: NaiveDate, today: NaiveDate) -> String {
    let days = today.signed_duration_since(date).num_days();
    let text = if days <= 0 {
        "today".to_string()
    } else {
        let formatter = Formatter::new();
        formatter.convert(std::time::Duration::from_secs(days as u64 * 86_400))
    };
    format!("{:>width$}", text, width = TIME_WIDTH)
}
