//! Analysis pipeline.
//!
//! Fetcher (URL mode only) → signal extraction → scoring and recommendations
//! → plays with ROI. An `Analyzer` is immutable once built and can be shared
//! across concurrent requests.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use scraper::Html;
use url::Url;

use crate::config::Config;
use crate::error_handling::{AnalysisError, InitializationError};
use crate::fetch::PageFetcher;
use crate::models::{
    AnalysisResult, Calibration, Constraint, DomSignals, FaqPair, Intent, PageSource,
    PlayEstimate, RequestContext,
};
use crate::parse::{extract_faq, signals_from_document, WidgetTable};
use crate::recommend::{recommend_plays, recommendations_for};
use crate::roi::estimate_roi;
use crate::scoring::score_signals;
use crate::security::validate_target_url;

/// One analysis request.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Page to analyze
    pub source: PageSource,
    /// Declared intent; plays are only attached when present
    pub intent: Option<Intent>,
    /// Declared constraint, if any
    pub constraint: Option<Constraint>,
    /// ROI calibration inputs
    pub calibration: Calibration,
    /// Caller identifiers echoed back untouched
    pub context: RequestContext,
}

impl AnalyzeRequest {
    /// A request with no intent, constraint, calibration or context.
    pub fn new(source: PageSource) -> Self {
        Self {
            source,
            intent: None,
            constraint: None,
            calibration: Calibration::new(),
            context: RequestContext::default(),
        }
    }
}

/// Runs the analysis pipeline.
///
/// # Examples
///
/// ```no_run
/// use seo_calculator::{AnalyzeRequest, Analyzer, Config, Intent, PageSource};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analyzer = Analyzer::new(Config::default())?;
/// let mut request = AnalyzeRequest::new(PageSource::Url("https://example.com".into()));
/// request.intent = Some(Intent::LeadGeneration);
///
/// let result = analyzer.analyze(request).await?;
/// println!("score {} / 100", result.score.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Analyzer {
    config: Config,
    fetcher: PageFetcher,
    widgets: WidgetTable,
}

impl Analyzer {
    /// Builds an analyzer.
    ///
    /// Uses the widget table at `config.widgets` when set, the built-in one
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the widget table cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn new(config: Config) -> Result<Self, InitializationError> {
        let widgets = match &config.widgets {
            Some(path) => load_widget_table(path)
                .map_err(|e| InitializationError::WidgetTableError(format!("{e:#}")))?,
            None => WidgetTable::builtin().clone(),
        };
        Self::with_widgets(config, widgets)
    }

    /// Builds an analyzer with a caller-supplied widget table.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_widgets(config: Config, widgets: WidgetTable) -> Result<Self, InitializationError> {
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher,
            widgets,
        })
    }

    /// The configuration this analyzer was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes one page.
    ///
    /// Returns a complete result or a single error, never a partial result.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` if the target URL fails validation
    /// - `FetchTimeout`, `FetchBlocked`, `FetchError` from the fetcher
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let AnalyzeRequest {
            source,
            intent,
            constraint,
            calibration,
            context,
        } = request;

        let (signals, faq_candidates) = match source {
            PageSource::Url(raw) => {
                let url = validate_target_url(&raw, self.config.allow_private_hosts)?;
                let page = self.fetcher.fetch_page(&url).await?;
                let (mut signals, faq) = self.extract(&page.html, Some(page.final_url.as_str()));
                signals.final_url = Some(page.final_url);
                signals.http_status = Some(page.http_status);
                (signals, faq)
            }
            PageSource::Html { html, url } => {
                let base = url.as_deref().and_then(html_base_url);
                self.extract(&html, base.as_ref().map(|u| u.as_str()))
            }
        };

        let result = build_result(signals, faq_candidates, intent, constraint, &calibration, context);

        info!(
            "Analyzed {} in {:?}: score {}, {} recommendation(s), plays {:?}{}",
            result
                .signals
                .final_url
                .as_deref()
                .unwrap_or("supplied HTML"),
            started.elapsed(),
            result.score.total,
            result.recommendations.len(),
            result
                .plays
                .as_ref()
                .map(|p| p.iter().map(|e| e.play.as_ref()).collect::<Vec<_>>()),
            result
                .org_id
                .as_deref()
                .map(|id| format!(" [org {id}]"))
                .unwrap_or_default(),
        );
        Ok(result)
    }

    fn extract(&self, html: &str, base_url: Option<&str>) -> (DomSignals, Vec<FaqPair>) {
        let document = Html::parse_document(html);
        let signals = signals_from_document(&document, html, base_url, &self.widgets);
        let faq = extract_faq(&document);
        (signals, faq)
    }
}

/// Base URL for supplied HTML, used only to resolve the canonical link.
///
/// The base is never fetched, so private hosts are fine. An unusable base
/// leaves `canonical_resolved` empty instead of failing the analysis.
fn html_base_url(raw: &str) -> Option<Url> {
    if raw.trim().is_empty() {
        return None;
    }
    match validate_target_url(raw, true) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!("Ignoring unusable base URL for supplied HTML: {}", e);
            None
        }
    }
}

fn load_widget_table(path: &Path) -> Result<WidgetTable> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read widget table {}", path.display()))?;
    let widgets = WidgetTable::from_json(&json)
        .with_context(|| format!("Invalid widget table {}", path.display()))?;
    info!(
        "Loaded widget table version {} ({} widgets) from {}",
        widgets.version,
        widgets.rules.len(),
        path.display()
    );
    Ok(widgets)
}

/// Assembles the result from extracted signals. Pure.
fn build_result(
    signals: DomSignals,
    faq_candidates: Vec<FaqPair>,
    intent: Option<Intent>,
    constraint: Option<Constraint>,
    calibration: &Calibration,
    context: RequestContext,
) -> AnalysisResult {
    let score = score_signals(&signals);
    let recommendations = recommendations_for(&score);
    let plays = intent.map(|intent| {
        recommend_plays(&signals, intent, constraint)
            .into_iter()
            .map(|play| PlayEstimate {
                play,
                label: play.label().to_string(),
                unit: play.roi_unit().to_string(),
                roi: estimate_roi(play, calibration),
            })
            .collect()
    });

    AnalysisResult {
        signals,
        score,
        recommendations,
        faq_candidates,
        plays,
        org_id: context.org_id,
    }
}
