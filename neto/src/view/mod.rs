//! View router: what to show, derived from session and feed state only.
//!
//! Nothing here holds state of its own. Rendering is plain text through
//! `Display`.

use std::fmt;

use crate::feed::FeedState;
use crate::models::{NewsItem, Session};

/// Product name shown in the header.
pub const TITLE: &str = "Neto Social";

/// Landing text for anonymous visitors.
pub const ANONYMOUS_TAGLINE: &str = "FB and VK killer";

/// Top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// No token: offer the login form.
    LoginForm,
    /// Token present. Name and avatar are missing until the profile is loaded.
    ProfileWidget {
        name: Option<String>,
        avatar_url: Option<String>,
    },
}

/// Main area below the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Anonymous,
    Loading,
    News(Vec<NewsItem>),
    Failed(String),
}

/// A full screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub header: Header,
    pub content: Content,
}

pub fn header(session: &Session) -> Header {
    if !session.is_authenticated() {
        return Header::LoginForm;
    }
    let profile = session.profile();
    Header::ProfileWidget {
        name: profile.map(|p| p.name.clone()),
        avatar_url: profile.map(|p| p.avatar_url.clone()),
    }
}

pub fn content(session: &Session, feed: &FeedState) -> Content {
    if !session.is_authenticated() {
        return Content::Anonymous;
    }
    match feed {
        FeedState::Idle | FeedState::Loading => Content::Loading,
        FeedState::Loaded(items) => Content::News(items.clone()),
        FeedState::Failed(e) => Content::Failed(e.to_string()),
    }
}

pub fn page(session: &Session, feed: &FeedState) -> Page {
    Page {
        header: header(session),
        content: content(session, feed),
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {TITLE} ==")?;
        match self {
            Self::LoginForm => write!(f, "[ username ] [ password ] [Login]"),
            Self::ProfileWidget { name, avatar_url } => {
                write!(f, "Hello, {}", name.as_deref().unwrap_or("..."))?;
                if let Some(url) = avatar_url {
                    write!(f, "  <{url}>")?;
                }
                write!(f, "  [Logout]")
            }
        }
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "{ANONYMOUS_TAGLINE}"),
            Self::Loading => write!(f, "Loading..."),
            Self::Failed(message) => write!(f, "Could not load news: {message}"),
            Self::News(items) if items.is_empty() => write!(f, "No news yet."),
            Self::News(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "# {}", item.title)?;
                    writeln!(f, "  [image] {}", item.image_url)?;
                    write!(f, "  {}", item.content)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;
        write!(f, "{}", self.content)
    }
}
