use crate::config::NewsdeskConfig;
use crate::images::Resolution;
use crate::model::{Post, UploadRecord};
use crate::render::FeedMarkup;
use std::path::PathBuf;

pub mod article;
pub mod config;
pub mod create;
pub mod delete;
pub mod feed;
pub mod helpers;
pub mod list;
pub mod resolve;
pub mod submit;
pub mod update;
pub mod uploads;

#[derive(Debug, Clone)]
pub struct NewsdeskPaths {
    /// Holds `config.json` and the store's documents.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_posts: Vec<Post>,
    pub listed_posts: Vec<Post>,
    pub uploads: Vec<UploadRecord>,
    pub resolution: Option<Resolution>,
    pub feed: Option<FeedMarkup>,
    pub html: Option<String>,
    pub config: Option<NewsdeskConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_posts(mut self, posts: Vec<Post>) -> Self {
        self.affected_posts = posts;
        self
    }

    pub fn with_listed_posts(mut self, posts: Vec<Post>) -> Self {
        self.listed_posts = posts;
        self
    }

    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }

    pub fn with_config(mut self, config: NewsdeskConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
