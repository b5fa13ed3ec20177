//! Link decision engine.
//!
//! Consumes the connector's findings plus environment policy and produces a
//! neutral [`LinkDescriptor`] ready for any output binding. Exactly one link
//! target mode is selected per render, first match wins:
//!
//! | Mode | Condition |
//! |------|-----------|
//! | `LocalOpen` | open allowed ∧ local file ∧ not exporting |
//! | `CacheTagged` | connection ∧ not directory ∧ no opt-out ∧ exists ∧ mtime known |
//! | `Plain` | otherwise |

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

use crate::core::SEPARATOR;
use crate::model::FileElement;
use crate::openfile::{OPEN_FILE_GATE, OpenFileGate};
use crate::utils::size::approximate_size;

use super::error::RenderError;
use super::resolve::ResolvedResource;

// =============================================================================
// Constants
// =============================================================================

/// Query parameter carrying the cache-busting timestamp.
pub const LAST_MODIFIED_PARAM: &str = "lastModified";

/// Request header value that opts out of last-modified tagging
/// (matched case-insensitively).
pub const LAST_MODIFIED_DISABLE_VALUE: &str = "false";

/// Encode a last-modified timestamp (milliseconds) for use as a URL
/// parameter value.
pub fn encode_last_modified(millis: u64) -> String {
    format!("{millis:x}")
}

// =============================================================================
// URI Encoding
// =============================================================================

/// Characters percent-encoded for inclusion in markup. Reserved URI
/// characters (`/ ? = & #`) keep their structural meaning.
const URI_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Percent-encode a URL for markup, preserving its structure.
pub fn encode_uri(url: &str) -> Cow<'_, str> {
    utf8_percent_encode(url, URI_UNSAFE).into()
}

// =============================================================================
// Collaborator Seams
// =============================================================================

/// Session/URL-rewriting hook. Identity unless the surrounding environment
/// says otherwise.
pub trait UrlRewriter {
    fn encode_url(&self, url: String) -> String;
}

/// Default rewriter: passes URLs through untouched.
pub struct IdentityRewriter;

impl UrlRewriter for IdentityRewriter {
    fn encode_url(&self, url: String) -> String {
        url
    }
}

/// Per-element CSS class policy for links.
pub trait LinkClassResolver {
    fn link_css_class(&self, element: &FileElement) -> Option<String>;
}

/// Default class policy: no class.
pub struct NoLinkClass;

impl LinkClassResolver for NoLinkClass {
    fn link_css_class(&self, _element: &FileElement) -> Option<String> {
        None
    }
}

/// Resolves a declared element id to a page-scoped unique id.
pub trait RefIdResolver {
    fn ref_id_in_page(&self, page: Option<&str>, raw_id: &str) -> String;
}

/// Default id policy: use the declared id verbatim.
pub struct VerbatimRefIds;

impl RefIdResolver for VerbatimRefIds {
    fn ref_id_in_page(&self, _page: Option<&str>, raw_id: &str) -> String {
        raw_id.to_string()
    }
}

// =============================================================================
// Render Environment
// =============================================================================

/// Environment policy and collaborators for one render.
pub struct RenderEnv<'a> {
    /// Base URL prefix prepended before the book prefix.
    pub context_path: &'a str,
    /// Export mode: static snapshot, local open suppressed.
    pub exporting: bool,
    /// Raw value of the request header opting out of last-modified tagging.
    pub last_modified_opt_out: Option<&'a str>,
    /// Capability gate for local file opening.
    pub gate: &'a OpenFileGate,
    pub url_rewriter: &'a dyn UrlRewriter,
    pub css_classes: &'a dyn LinkClassResolver,
    pub ref_ids: &'a dyn RefIdResolver,
}

impl<'a> RenderEnv<'a> {
    /// Environment with default collaborators and the global gate.
    pub fn new(context_path: &'a str) -> Self {
        Self {
            context_path,
            exporting: false,
            last_modified_opt_out: None,
            gate: &OPEN_FILE_GATE,
            url_rewriter: &IdentityRewriter,
            css_classes: &NoLinkClass,
            ref_ids: &VerbatimRefIds,
        }
    }

    /// Whether last-modified tagging was explicitly disabled for this
    /// request. Independent of export mode.
    fn last_modified_disabled(&self) -> bool {
        self.last_modified_opt_out
            .is_some_and(|v| v.eq_ignore_ascii_case(LAST_MODIFIED_DISABLE_VALUE))
    }
}

// =============================================================================
// Link Descriptor
// =============================================================================

/// Where the link points, one mode per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LinkTarget {
    /// Direct filesystem URI plus the identifying triple for a client-side
    /// open handler. The href stays as a fallback target.
    LocalOpen {
        href: String,
        domain: String,
        book_path: String,
        resource_path: String,
    },
    /// URL carrying a cache-busting last-modified parameter.
    CacheTagged { href: String },
    /// URL with no query parameter.
    Plain { href: String },
}

impl LinkTarget {
    pub fn href(&self) -> &str {
        match self {
            Self::LocalOpen { href, .. } | Self::CacheTagged { href } | Self::Plain { href } => {
                href
            }
        }
    }
}

/// Inner content of the rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LinkLabel {
    /// Caller-supplied body, used verbatim.
    Body(String),
    /// Derived filename label.
    Filename(String),
}

/// Structured link output, ready for an output binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDescriptor {
    pub target: LinkTarget,
    /// Page-scoped element anchor id.
    pub id: Option<String>,
    pub css_class: Option<String>,
    pub label: LinkLabel,
    /// Human-readable approximate size, without the surrounding parentheses.
    pub size: Option<String>,
}

// =============================================================================
// Decision Logic
// =============================================================================

/// Derive the link descriptor for a resolved file reference.
pub fn decide(
    element: &FileElement,
    resolved: &mut ResolvedResource,
    env: &RenderEnv<'_>,
) -> Result<LinkDescriptor, RenderError> {
    let Some((_, reference)) = element.resource() else {
        return Err(RenderError::ResourceNotBound(element.to_string()));
    };
    let book = reference.book();
    let path = reference.path();
    let has_body = element.has_body();

    let open_file = env.gate.is_allowed(env) && !env.exporting;

    let target = if open_file && let Some(file) = &resolved.local_file {
        let uri = url::Url::from_file_path(file)
            .map(|u| u.to_string())
            .unwrap_or_else(|()| file.display().to_string());
        LinkTarget::LocalOpen {
            href: env.url_rewriter.encode_url(uri),
            domain: book.domain().to_string(),
            book_path: book.path().to_string(),
            resource_path: path.as_str().to_string(),
        }
    } else {
        let base = format!("{}{}{}", env.context_path, book.prefix(), path);
        match last_modified_tag(resolved, env)? {
            Some(millis) => {
                let tagged = format!(
                    "{base}?{LAST_MODIFIED_PARAM}={}",
                    encode_last_modified(millis)
                );
                LinkTarget::CacheTagged {
                    href: env.url_rewriter.encode_url(encode_uri(&tagged).into_owned()),
                }
            }
            None => LinkTarget::Plain {
                href: env.url_rewriter.encode_url(encode_uri(&base).into_owned()),
            },
        }
    };

    let label = if has_body {
        LinkLabel::Body(element.body().unwrap_or_default().to_string())
    } else {
        let derived = || {
            path.filename()
                .map(str::to_string)
                .ok_or_else(|| RenderError::EmptyFilename(path.as_str().to_string()))
        };
        match &resolved.local_file {
            None => LinkLabel::Filename(derived()?),
            Some(file) => {
                let mut name = match file.file_name() {
                    Some(name) => name.to_string_lossy().into_owned(),
                    None => derived()?,
                };
                if resolved.is_directory {
                    name.push(SEPARATOR);
                }
                LinkLabel::Filename(name)
            }
        }
    };

    let size = size_suffix(resolved, has_body)?;

    let css_class = if has_body {
        None
    } else {
        env.css_classes.link_css_class(element)
    };

    let id = element
        .id()
        .map(|raw| env.ref_ids.ref_id_in_page(element.page(), raw));

    Ok(LinkDescriptor {
        target,
        id,
        css_class,
        label,
        size,
    })
}

/// Last-modified timestamp for cache tagging, when all gates pass.
fn last_modified_tag(
    resolved: &mut ResolvedResource,
    env: &RenderEnv<'_>,
) -> Result<Option<u64>, RenderError> {
    if resolved.is_directory || env.last_modified_disabled() {
        return Ok(None);
    }
    let Some(conn) = resolved.connection.as_mut() else {
        return Ok(None);
    };
    if !conn.exists()? {
        return Ok(None);
    }
    let millis = conn.last_modified()?;
    Ok((millis != 0).then_some(millis))
}

/// Approximate size suffix, when the length is known and a label is shown.
fn size_suffix(
    resolved: &mut ResolvedResource,
    has_body: bool,
) -> Result<Option<String>, RenderError> {
    if has_body || resolved.is_directory {
        return Ok(None);
    }
    let Some(conn) = resolved.connection.as_mut() else {
        return Ok(None);
    };
    if !conn.exists()? {
        return Ok(None);
    }
    let length = conn.length()?;
    if length == -1 {
        return Ok(None);
    }
    Ok(Some(approximate_size(length as u64)))
}
