use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "newsdesk", bin_name = "newsdesk", version)]
#[command(about = "Publish and browse a local journalism blog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json and the stored documents
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Post fields shared by `create` and `edit`. On edit, omitted fields keep
/// their current value.
#[derive(Args, Debug, Clone, Default)]
pub struct PostFields {
    /// Summary shown on the feed card
    #[arg(long)]
    pub summary: Option<String>,

    /// Body, as Markdown or HTML
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the body from a file
    #[arg(long, value_name = "FILE")]
    pub content_file: Option<PathBuf>,

    /// Image: a local file to upload, or an http(s)/uploads/ reference
    #[arg(long, value_name = "PATH_OR_REF")]
    pub image: Option<String>,

    /// Declared media type of the image file (guessed from the extension otherwise)
    #[arg(long, value_name = "MIME", requires = "image")]
    pub image_type: Option<String>,

    /// Video URL
    #[arg(long)]
    pub video: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Print the admin list markup instead
        #[arg(long)]
        html: bool,
    },

    /// Publish a new post
    #[command(alias = "n", display_order = 2)]
    Create {
        /// Post title
        #[arg(long, short)]
        title: String,

        #[command(flatten)]
        fields: PostFields,

        /// Show this post in the featured slot
        #[arg(long)]
        featured: bool,
    },

    /// Edit a post in place
    #[command(alias = "e", display_order = 3)]
    Edit {
        /// Post id
        id: i64,

        /// New title
        #[arg(long, short)]
        title: Option<String>,

        #[command(flatten)]
        fields: PostFields,

        /// Mark or unmark as featured
        #[arg(long, value_name = "BOOL")]
        featured: Option<bool>,
    },

    /// Delete a post
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Post id
        id: i64,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Render the public feed
    #[command(display_order = 10)]
    Feed {
        /// Write the page to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print only the featured and grid fragments
        #[arg(long)]
        fragments: bool,
    },

    /// Render an article page by id or query string (e.g. 42 or "?id=42")
    #[command(display_order = 11)]
    Article {
        id_or_query: String,

        /// Write the page to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Show how an image reference resolves
    #[command(display_order = 20)]
    Resolve { reference: String },

    /// List stored uploads
    #[command(display_order = 21)]
    Uploads,

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., uploads-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_fields() {
        let cli = Cli::try_parse_from([
            "newsdesk",
            "create",
            "--title",
            "Hello",
            "--summary",
            "S",
            "--image",
            "cover.png",
            "--featured",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Create {
                title,
                fields,
                featured,
            }) => {
                assert_eq!(title, "Hello");
                assert_eq!(fields.summary.as_deref(), Some("S"));
                assert_eq!(fields.image.as_deref(), Some("cover.png"));
                assert!(featured);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn content_and_content_file_conflict() {
        let parsed = Cli::try_parse_from([
            "newsdesk",
            "create",
            "-t",
            "T",
            "--content",
            "x",
            "--content-file",
            "f.md",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn parses_global_data_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["newsdesk", "delete", "5", "--yes", "--data-dir", "/tmp/x"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Commands::Delete { id: 5, yes: true })));
    }

    #[test]
    fn edit_featured_takes_a_bool() {
        let cli = Cli::try_parse_from(["newsdesk", "edit", "3", "--featured", "false"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Edit {
                id: 3,
                featured: Some(false),
                ..
            })
        ));
    }
}
