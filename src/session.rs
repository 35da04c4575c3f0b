//! Per-page reader session.
//!
//! A [`PreviewSession`] owns the enabled flag, the active settings and a
//! snapshot of the page content taken before the first transformation. All
//! page edits go through it, either directly or via [`Message`]s.

use serde::{Deserialize, Serialize};

use crate::apply::{
    apply_bionic, apply_gradient_named, remove_bionic, remove_gradient, BionicOptions,
};
use crate::error::{Error, Result};
use crate::markdown::MarkdownConverter;
use crate::model::{Element, Node, Page};
use crate::parser::parse_fragment;
use crate::settings::{Settings, SettingsPatch, SettingsStore, StoredState};

/// Body class while the reader is active.
pub const ENABLED_CLASS: &str = "bionic-reading-enabled";

/// Body class while a Markdown file is shown rendered.
pub const PREVIEW_CLASS: &str = "bionic-markdown-preview";

/// Class of the container replacing the body content of a Markdown file.
pub const CONTAINER_CLASS: &str = "bionic-markdown-container";

/// Class of the article holding rendered Markdown.
pub const CONTENT_CLASS: &str = "bionic-markdown-content";

/// URL prefixes of pages that cannot be modified.
pub const RESTRICTED_PREFIXES: &[&str] = &["chrome://", "chrome-extension://", "about:", "edge://"];

/// Whether a page URL is off-limits for content changes.
pub fn is_restricted_url(url: &str) -> bool {
    RESTRICTED_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// Request sent to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// Flip the enabled flag.
    Toggle,

    /// Merge new settings and re-apply when enabled.
    UpdateSettings {
        /// Fields to change
        settings: SettingsPatch,
    },

    /// Report the session state.
    GetState,

    /// Report the active settings.
    GetSettings,

    /// Replace and persist the settings without touching the page.
    SaveSettings {
        /// New settings
        settings: Settings,
    },
}

impl Message {
    /// Wire names of all message types.
    pub const TYPES: &'static [&'static str] = &[
        "toggle",
        "updateSettings",
        "getState",
        "getSettings",
        "saveSettings",
    ];
}

/// Snapshot reported for [`Message::GetState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Whether the reader is active
    pub is_enabled: bool,
    /// Active settings
    pub settings: Settings,
    /// Whether the page is a raw Markdown file
    pub is_markdown_file: bool,
}

/// Reply to a [`Message`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Result of a toggle
    Toggled {
        #[serde(rename = "isEnabled")]
        is_enabled: bool,
    },
    /// Full session state
    State(SessionState),
    /// Active settings
    Settings(Settings),
    /// Acknowledgement
    Success { success: bool },
    /// Failure description
    Error { error: String },
}

impl Response {
    /// Error reply for an unrecognized message type.
    pub fn unknown() -> Self {
        Response::Error {
            error: "Unknown message type".to_string(),
        }
    }

    /// Whether this is an error reply.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}

/// Reader state for one page.
#[derive(Debug, Clone, Default)]
pub struct PreviewSession {
    enabled: bool,
    settings: Settings,
    is_markdown_file: bool,
    original: Option<Vec<Node>>,
    converter: MarkdownConverter,
    store: Option<SettingsStore>,
}

impl PreviewSession {
    /// Create a disabled session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disabled session with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Persist the enabled flag and settings to `store` on every change.
    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a custom Markdown converter.
    pub fn with_converter(mut self, converter: MarkdownConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Whether the reader is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the page was classified as a raw Markdown file.
    pub fn is_markdown_file(&self) -> bool {
        self.is_markdown_file
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        SessionState {
            is_enabled: self.enabled,
            settings: self.settings.clone(),
            is_markdown_file: self.is_markdown_file,
        }
    }

    /// What would be persisted right now.
    pub fn stored_state(&self) -> StoredState {
        StoredState {
            is_enabled: self.enabled,
            settings: self.settings.clone(),
        }
    }

    /// Attach to a freshly loaded page.
    ///
    /// Markdown files are enabled automatically when `auto_markdown` is set;
    /// other pages follow the stored enabled flag.
    pub fn init(&mut self, page: &mut Page, stored: &StoredState) {
        self.is_markdown_file = page.is_markdown_file();
        self.settings = stored.settings.clone();

        if self.is_markdown_file && self.settings.auto_markdown {
            log::debug!("session: auto-enabling Markdown file {}", page.url);
            self.enabled = true;
            self.apply(page);
        } else if stored.is_enabled {
            self.enabled = true;
            self.apply(page);
        }
    }

    /// Apply the reader to the page with the current settings.
    pub fn apply(&mut self, page: &mut Page) {
        if self.original.is_none() {
            self.original = Some(page.body.children.clone());
        }

        if self.is_markdown_file && self.settings.auto_markdown {
            self.render_markdown(page);
        }

        let options = BionicOptions::new()
            .with_fixation(self.settings.fixation())
            .with_dim_opacity(self.settings.dim_opacity);
        let theme = self.settings.gradient_theme.clone();
        let dark = page.is_dark();

        with_content_area(&mut page.body, |area| {
            apply_bionic(area, &options);
            if theme != "none" {
                apply_gradient_named(area, &theme, dark);
            }
        });

        page.body.add_class(ENABLED_CLASS);
    }

    /// Remove the reader from the page.
    ///
    /// Markdown files get their original content back.
    pub fn remove(&mut self, page: &mut Page) {
        with_content_area(&mut page.body, |area| {
            remove_bionic(area);
            remove_gradient(area);
        });

        if self.is_markdown_file {
            if let Some(original) = &self.original {
                page.body.children = original.clone();
                page.body.remove_class(PREVIEW_CLASS);
            }
        }

        page.body.remove_class(ENABLED_CLASS);
    }

    /// Flip the enabled flag and update the page. Returns the new flag.
    pub fn toggle(&mut self, page: &mut Page) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.apply(page);
        } else {
            self.remove(page);
        }
        self.persist();
        self.enabled
    }

    /// Merge a settings update and re-apply when enabled.
    ///
    /// Invalid updates are rejected and leave the session untouched.
    pub fn update_settings(&mut self, page: &mut Page, patch: &SettingsPatch) -> Result<()> {
        let next = self.settings.merged(patch);
        next.validate()?;
        self.settings = next;
        self.persist();

        if self.enabled {
            self.remove(page);
            self.apply(page);
        }
        Ok(())
    }

    /// Handle a message.
    pub fn handle(&mut self, page: &mut Page, message: Message) -> Response {
        match message {
            Message::Toggle => Response::Toggled {
                is_enabled: self.toggle(page),
            },
            Message::UpdateSettings { settings } => match self.update_settings(page, &settings) {
                Ok(()) => Response::Success { success: true },
                Err(e) => Response::Error {
                    error: e.to_string(),
                },
            },
            Message::GetState => Response::State(self.state()),
            Message::GetSettings => Response::Settings(self.settings.clone()),
            Message::SaveSettings { settings } => match settings.validate() {
                Ok(()) => {
                    self.settings = settings;
                    self.persist();
                    Response::Success { success: true }
                }
                Err(e) => Response::Error {
                    error: e.to_string(),
                },
            },
        }
    }

    /// Handle a JSON-encoded message and return the JSON reply.
    ///
    /// Unknown message types get an error reply; input that is not a JSON
    /// object is an error.
    pub fn handle_json(&mut self, page: &mut Page, json: &str) -> Result<String> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let kind = value
            .as_object()
            .ok_or_else(|| Error::Serialization("message must be a JSON object".into()))?
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        let response = if Message::TYPES.contains(&kind.as_str()) {
            match serde_json::from_value::<Message>(value) {
                Ok(message) => self.handle(page, message),
                Err(e) => Response::Error {
                    error: format!("Invalid {} message: {}", kind, e),
                },
            }
        } else {
            log::debug!("session: unknown message type '{}'", kind);
            Response::unknown()
        };

        Ok(serde_json::to_string(&response)?)
    }

    fn render_markdown(&self, page: &mut Page) {
        let raw = page.raw_text();
        if raw.is_empty() {
            return;
        }

        let html = self.converter.convert(&raw);
        let mut article = Element::new("article").with_class(CONTENT_CLASS);
        article.children = parse_fragment(&html);
        let container = Element::new("div")
            .with_class(CONTAINER_CLASS)
            .with_child(article);

        page.set_body_content(vec![container.into()]);
        page.body.add_class(PREVIEW_CLASS);
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.stored_state()) {
                log::warn!("session: failed to persist state: {}", e);
            }
        }
    }
}

fn is_content(el: &Element) -> bool {
    el.has_class(CONTENT_CLASS)
}

/// Run `f` on the rendered Markdown article if present, else on the body.
fn with_content_area<R>(body: &mut Element, f: impl FnOnce(&mut Element) -> R) -> R {
    if body.find(&is_content).is_some() {
        if let Some(area) = body.find_mut(&is_content) {
            return f(area);
        }
    }
    f(body)
}
