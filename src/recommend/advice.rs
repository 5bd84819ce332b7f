//! Factor → advice table.

use crate::models::Factor;

/// Fixed remediation text for a factor that scored below threshold.
pub fn advice_for(factor: Factor) -> &'static str {
    match factor {
        Factor::Title => {
            "Write a unique <title> of 10-60 characters that names the service and location."
        }
        Factor::MetaDescription => {
            "Add a meta description of 50-160 characters summarising the page with a call to action."
        }
        Factor::Headings => {
            "Use exactly one <h1> for the page topic and break content into <h2> sections."
        }
        Factor::Canonical => {
            "Add a <link rel=\"canonical\"> pointing at the preferred URL to avoid duplicate indexing."
        }
        Factor::StructuredData => {
            "Add JSON-LD structured data (e.g. LocalBusiness, FAQPage) with a valid @type."
        }
        Factor::MobileViewport => {
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"> for mobile rendering."
        }
        Factor::SocialTags => {
            "Add Open Graph (og:title, og:description, og:image, og:url) and Twitter Card tags."
        }
        Factor::Indexability => {
            "Remove noindex/nofollow from the robots meta tag unless the page should stay out of search."
        }
        Factor::Conversion => {
            "Add a visible contact or booking link and an on-page chat or scheduling widget."
        }
    }
}
