//! Implements RenderSurface as an in-memory HTML page.
//!
//! Holds the shell (header chrome, named regions, modal and video overlays) and answers
//! element lookups by scanning the current markup. Hidden chrome is simply not emitted,
//! so only clickable elements can be found.

use crate::domain::{Chrome, DomainError, Notice, NoticeKind};
use crate::ports::{CONTENT_REGION, PageElements, RenderSurface};
use crate::shared::html::escape_html;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, error};

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[a-zA-Z][a-zA-Z0-9-]*(\s[^>]*)?>").expect("Invalid tag regex pattern")
});

static ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*"([^"]*)""#)
        .expect("Invalid attribute regex pattern")
});

const MODAL_ID: &str = "modal-overlay";
const VIDEO_MODAL_ID: &str = "video-modal";

#[derive(Debug, Default)]
struct PageData {
    /// region id -> markup, in shell order.
    regions: Vec<(String, String)>,
    chrome: Chrome,
    modal: Option<Notice>,
    video: Option<Notice>,
}

/// In-memory page. `modals = false` models a shell without overlay elements.
pub struct HtmlPage {
    data: RwLock<PageData>,
    modals: bool,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPage {
    /// Standard shell: the content region plus both overlays.
    pub fn new() -> Self {
        Self::with_regions(&[CONTENT_REGION])
    }

    pub fn with_regions(region_ids: &[&str]) -> Self {
        let regions = region_ids
            .iter()
            .map(|id| (id.to_string(), String::new()))
            .collect();
        Self {
            data: RwLock::new(PageData {
                regions,
                ..Default::default()
            }),
            modals: true,
        }
    }

    pub fn without_modals(mut self) -> Self {
        self.modals = false;
        self
    }

    /// Current markup of a region.
    pub async fn region(&self, region_id: &str) -> Option<String> {
        let data = self.data.read().await;
        data.regions
            .iter()
            .find(|(id, _)| id == region_id)
            .map(|(_, markup)| markup.clone())
    }

    pub async fn chrome(&self) -> Chrome {
        self.data.read().await.chrome.clone()
    }

    fn render_page(&self, data: &PageData) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n<title>NexusLearn</title>\n");
        html.push_str("</head>\n<body class=\"bg-gray-50\">\n");
        html.push_str(&render_header(&data.chrome));

        for (id, markup) in &data.regions {
            html.push_str(&format!(
                "<main id=\"{}\" class=\"container mx-auto px-4 py-8\">\n{}\n</main>\n",
                escape_html(id),
                markup
            ));
        }

        if self.modals {
            if let Some(ref notice) = data.modal {
                html.push_str(&render_modal(notice));
            }
            if let Some(ref notice) = data.video {
                html.push_str(&render_video(notice));
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn render_header(chrome: &Chrome) -> String {
    let mut html = String::new();
    html.push_str("<header class=\"bg-white shadow\">\n<nav class=\"flex items-center justify-between p-4\">\n");
    html.push_str("<span class=\"text-2xl font-bold text-indigo-600\">NexusLearn</span>\n");
    html.push_str("<div class=\"hidden md:flex space-x-6\">\n");
    for (id, label) in [
        ("nav-home", "Home"),
        ("nav-courses", "Courses"),
        ("nav-forum", "Forum"),
        ("nav-quizzes", "Quizzes"),
    ] {
        html.push_str(&format!(
            "<button id=\"{}\" class=\"nav-btn\">{}</button>\n",
            id, label
        ));
    }
    if chrome.dashboard_nav_visible {
        html.push_str("<button id=\"nav-dashboard\" class=\"nav-btn\">Dashboard</button>\n");
    }
    html.push_str("</div>\n<div class=\"flex items-center space-x-4\">\n");
    if let Some(ref name) = chrome.user_display {
        html.push_str(&format!(
            "<span id=\"user-display\" class=\"text-gray-700 font-medium\">{}</span>\n",
            escape_html(name)
        ));
    }
    let icon = if chrome.signed_in {
        "fa-sign-out-alt"
    } else {
        "fa-sign-in-alt"
    };
    html.push_str(&format!(
        "<button id=\"auth-button\" class=\"bg-indigo-600 text-white px-4 py-2 rounded-lg\"><i class=\"fas {}\"></i><span>{}</span></button>\n",
        icon,
        chrome.auth_label()
    ));
    html.push_str("<button id=\"mobile-menu-btn\" class=\"md:hidden\"><i class=\"fas fa-bars\"></i></button>\n");
    html.push_str("</div>\n</nav>\n");
    if chrome.mobile_menu_open {
        html.push_str("<div id=\"mobile-menu\" class=\"md:hidden p-4 space-y-2\">\n");
        for (id, label) in [
            ("nav-home-mobile", "Home"),
            ("nav-courses-mobile", "Courses"),
            ("nav-dashboard-mobile", "Dashboard"),
        ] {
            html.push_str(&format!(
                "<button id=\"{}\" class=\"block w-full text-left\">{}</button>\n",
                id, label
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</header>\n");
    html
}

fn render_modal(notice: &Notice) -> String {
    format!(
        "<div id=\"{}\" class=\"fixed inset-0 bg-black/50 flex items-center justify-center\">\n\
         <div class=\"bg-white rounded-xl p-6 max-w-md\">\n\
         <h3 id=\"modal-title\" class=\"text-xl font-bold mb-2\">{}</h3>\n\
         <p id=\"modal-message\" class=\"text-gray-600 mb-6\">{}</p>\n\
         <button id=\"modal-action\" class=\"bg-indigo-600 text-white px-4 py-2 rounded-lg\">{}</button>\n\
         <button id=\"modal-close\" class=\"text-gray-500\">Close</button>\n\
         </div>\n</div>\n",
        MODAL_ID,
        escape_html(&notice.title),
        escape_html(&notice.message),
        escape_html(&notice.action_label)
    )
}

fn render_video(notice: &Notice) -> String {
    format!(
        "<div id=\"{}\" class=\"fixed inset-0 bg-black/75 flex items-center justify-center\">\n\
         <div class=\"bg-white rounded-xl p-6 max-w-2xl\">\n\
         <h3 id=\"video-title\" class=\"text-xl font-bold mb-2\">{}</h3>\n\
         <div class=\"aspect-video bg-gray-900 rounded-lg mb-4\"></div>\n\
         <p id=\"video-description\" class=\"text-gray-600\">{}</p>\n\
         <button id=\"video-close\" class=\"text-gray-500\">Close</button>\n\
         </div>\n</div>\n",
        VIDEO_MODAL_ID,
        escape_html(&notice.title),
        escape_html(&notice.message)
    )
}

/// Attribute maps of every opening tag, in document order.
fn parse_elements(markup: &str) -> Vec<HashMap<String, String>> {
    TAG_REGEX
        .captures_iter(markup)
        .map(|tag| {
            let attrs = tag.get(1).map(|m| m.as_str()).unwrap_or("");
            ATTR_REGEX
                .captures_iter(attrs)
                .map(|a| (a[1].to_ascii_lowercase(), unescape_attr(&a[2])))
                .collect()
        })
        .collect()
}

fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[async_trait::async_trait]
impl RenderSurface for HtmlPage {
    async fn has_region(&self, region_id: &str) -> bool {
        let data = self.data.read().await;
        data.regions.iter().any(|(id, _)| id == region_id)
    }

    async fn replace_region(&self, region_id: &str, markup: &str) -> Result<(), DomainError> {
        let mut data = self.data.write().await;
        match data.regions.iter_mut().find(|(id, _)| id == region_id) {
            Some((_, content)) => {
                *content = markup.to_string();
                debug!(region_id, bytes = markup.len(), "region replaced");
                Ok(())
            }
            None => Err(DomainError::MissingTarget(region_id.to_string())),
        }
    }

    async fn elements(&self) -> PageElements {
        let page = {
            let data = self.data.read().await;
            self.render_page(&data)
        };
        PageElements::new(parse_elements(&page))
    }

    async fn show_notice(&self, notice: &Notice) -> Result<(), DomainError> {
        if !self.modals {
            let element = match notice.kind {
                NoticeKind::Modal => MODAL_ID,
                NoticeKind::Video => VIDEO_MODAL_ID,
            };
            error!(element, "modal elements not found");
            return Err(DomainError::MissingTarget(element.to_string()));
        }
        let mut data = self.data.write().await;
        match notice.kind {
            NoticeKind::Modal => data.modal = Some(notice.clone()),
            NoticeKind::Video => data.video = Some(notice.clone()),
        }
        Ok(())
    }

    async fn dismiss_notice(&self, kind: NoticeKind) {
        let mut data = self.data.write().await;
        match kind {
            NoticeKind::Modal => data.modal = None,
            NoticeKind::Video => data.video = None,
        }
    }

    async fn open_notice(&self, kind: NoticeKind) -> Option<Notice> {
        let data = self.data.read().await;
        match kind {
            NoticeKind::Modal => data.modal.clone(),
            NoticeKind::Video => data.video.clone(),
        }
    }

    async fn update_chrome(&self, chrome: &Chrome) -> Result<(), DomainError> {
        self.data.write().await.chrome = chrome.clone();
        Ok(())
    }

    async fn snapshot(&self) -> String {
        let data = self.data.read().await;
        self.render_page(&data)
    }
}
