//! Data model shared by the analysis pipeline.
//!
//! Every value here is built fresh per request and never mutated after
//! construction; nothing is shared between requests.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Caller-supplied numeric inputs used to scale ROI estimates.
pub type Calibration = BTreeMap<String, f64>;

/// Where the page markup comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// Fetch the page; must be an `http`/`https` URL.
    Url(String),
    /// Markup supplied by the caller.
    Html {
        /// Raw markup
        html: String,
        /// Page URL, used only to resolve relative links; never fetched
        url: Option<String>,
    },
}

/// Facts extracted from a page's markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSignals {
    /// Trimmed text of the first `<title>`, empty if absent
    pub title: String,
    /// Length of `title` in characters
    pub title_length: usize,
    /// `content` of the first `<meta name="description">`, verbatim
    pub meta_description: Option<String>,
    /// Length of `meta_description` in characters, 0 if absent
    pub meta_description_length: usize,
    /// Trimmed `<h1>` texts in document order, duplicates kept
    pub h1: Vec<String>,
    /// `h1.len() > 1`
    pub multiple_h1: bool,
    /// Trimmed `<h2>` texts in document order, duplicates kept
    pub h2: Vec<String>,
    /// `href` of the first `<link rel="canonical">`
    pub canonical: Option<String>,
    /// `canonical` resolved against the page URL, when both are known
    pub canonical_resolved: Option<String>,
    /// `content` of the first `<meta name="robots">`, verbatim
    pub robots_directive: Option<String>,
    /// Robots directive mentions `noindex`
    pub noindex: bool,
    /// Robots directive mentions `nofollow`
    pub nofollow: bool,
    /// A `<meta name="viewport">` exists
    pub viewport_present: bool,
    /// Number of `<meta property="og:*">` tags
    pub open_graph_count: usize,
    /// Number of `<meta name="twitter:*">` tags
    pub twitter_tag_count: usize,
    /// Number of JSON-LD script blocks, parseable or not
    pub json_ld_count: usize,
    /// `@type` values from parseable JSON-LD blocks
    pub json_ld_types: BTreeSet<String>,
    /// `json_ld_count > 0`
    pub has_schema: bool,
    /// A sitemap link or a literal `sitemap.xml` reference exists
    pub has_sitemap: bool,
    /// An anchor links to a contact, booking or call page
    pub contact_or_booking_link_present: bool,
    /// Names of third-party widgets found in scripts
    pub detected_widgets: BTreeSet<String>,
    /// URL after redirects; fetched pages only
    pub final_url: Option<String>,
    /// Final response status; fetched pages only
    pub http_status: Option<u16>,
}

/// One named dimension of the 0-100 score.
///
/// Declaration order is the order factors appear in a `ScoreResult`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Factor {
    /// Title present with a length in the ideal range
    Title,
    /// Meta description present with a length in the ideal range
    MetaDescription,
    /// One `<h1>` plus `<h2>` sections
    Headings,
    /// Canonical link present
    Canonical,
    /// JSON-LD present and typed
    StructuredData,
    /// Viewport meta tag present
    MobileViewport,
    /// Open Graph and Twitter Card coverage
    SocialTags,
    /// Not excluded by robots directives
    Indexability,
    /// Contact/booking link and on-page widget
    Conversion,
}

/// Score with its per-factor breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Rounded mean of all factor scores, 0-100
    pub total: u8,
    /// Every factor's score, 0-100
    pub factors: BTreeMap<Factor, u8>,
}

/// What the site owner wants out of the engagement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    /// More enquiries and bookings
    LeadGeneration,
    /// Fewer repetitive support contacts
    SupportReduction,
    /// More visitors converting on the page
    ConversionIncrease,
    /// Faster content production
    ContentSpeed,
}

/// What limits the site owner's ability to ship changes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Constraint {
    /// No developer capacity to implement changes
    NoDevTime,
    /// Cannot add new third-party tools
    NoNewTools,
    /// Results needed within 30 days
    ThirtyDayDeadline,
    /// Regulated content or data handling
    Compliance,
}

/// A remediation action that can be recommended to a site owner.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Play {
    /// Text back missed callers with a booking link
    MissedCallBooking,
    /// Answer common questions on the page itself
    FaqWidget,
}

impl Play {
    /// Label shown to site owners.
    pub fn label(&self) -> &'static str {
        match self {
            Play::MissedCallBooking => "Missed-Call → SMS → Booking",
            Play::FaqWidget => "FAQ → On-Page Q&A",
        }
    }

    /// Unit the ROI range is expressed in.
    pub fn roi_unit(&self) -> &'static str {
        match self {
            Play::MissedCallBooking => "bookings_per_week",
            Play::FaqWidget => "leads_per_week",
        }
    }
}

/// Estimated weekly impact of a play. Invariant: `low <= likely <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiRange {
    /// Conservative estimate
    pub low: f64,
    /// Expected estimate
    pub likely: f64,
    /// Optimistic estimate
    pub high: f64,
}

/// A recommended play together with its ROI estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayEstimate {
    /// Stable play identifier
    pub play: Play,
    /// Label shown to site owners
    pub label: String,
    /// Unit of `roi`, e.g. `bookings_per_week`
    pub unit: String,
    /// Estimated weekly impact
    pub roi: RoiRange,
}

/// A heading/answer pair that could seed an on-page FAQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPair {
    /// Heading text
    pub question: String,
    /// Text of the paragraph or list following the heading
    pub answer: String,
}

/// Identifiers supplied by the surrounding integration, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Caller's organization identifier
    pub org_id: Option<String>,
}

/// The response object of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Extracted signals, flattened into the top level when serialized
    #[serde(flatten)]
    pub signals: DomSignals,
    /// Score and per-factor breakdown
    pub score: ScoreResult,
    /// Advice for every factor below threshold, in factor order
    pub recommendations: Vec<String>,
    /// Heading/answer pairs found on the page
    pub faq_candidates: Vec<FaqPair>,
    /// Plays with ROI; present only when an intent was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plays: Option<Vec<PlayEstimate>>,
    /// Echo of the caller's organization identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}
