use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::Work;

/// Client for the archive's newest-works search listing.
#[derive(Clone)]
pub struct ArchiveClient {
    client: reqwest::Client,
    listing_url: String,
}

impl ArchiveClient {
    pub fn new(listing_url: String) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fandom-pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| format!("failed to build archive client: {}", err))?;
        Ok(Self {
            client,
            listing_url,
        })
    }

    /// Fetch the first page of newest works. The cache-busting parameter
    /// defeats the archive's page cache so repeated runs see fresh data.
    pub async fn fetch_latest_works(&self) -> Result<Vec<Work>, String> {
        let cache_bust = Utc::now().timestamp().to_string();
        let response = self
            .client
            .get(&self.listing_url)
            .query(&[("cache_bust", cache_bust.as_str())])
            .send()
            .await
            .map_err(|err| format!("listing request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("listing error {}", status));
        }

        let html = response
            .text()
            .await
            .map_err(|err| format!("listing read failed: {}", err))?;
        let works = parse_listing(&html, Utc::now().date_naive())?;
        tracing::info!(count = works.len(), "parsed listing");
        Ok(works)
    }
}

/// Extract works from the listing HTML. Each blurb is an `li` element
/// with id `work_<id>`; fandom names are the tag links inside its
/// fandoms heading. Blurbs that don't match are skipped.
pub fn parse_listing(html: &str, posted: NaiveDate) -> Result<Vec<Work>, String> {
    let work_re = Regex::new(r#"<li[^>]+id="work_(\d+)""#)
        .map_err(|err| format!("bad work pattern: {}", err))?;
    let fandoms_re = Regex::new(r#"(?s)<h5 class="fandoms heading">(.*?)</h5>"#)
        .map_err(|err| format!("bad fandoms pattern: {}", err))?;
    let tag_re = Regex::new(r#"<a class="tag"[^>]*>([^<]+)</a>"#)
        .map_err(|err| format!("bad tag pattern: {}", err))?;

    let blurbs: Vec<(usize, u64)> = work_re
        .captures_iter(html)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let id = caps.get(1)?.as_str().parse::<u64>().ok()?;
            Some((start, id))
        })
        .collect();

    let mut works = Vec::new();
    for (index, (start, id)) in blurbs.iter().enumerate() {
        let end = blurbs
            .get(index + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or(html.len());
        let blurb = &html[*start..end];

        let Some(heading) = fandoms_re.captures(blurb).and_then(|caps| caps.get(1)) else {
            tracing::warn!(work_id = id, "blurb without fandoms heading, skipping");
            continue;
        };
        let fandoms: Vec<String> = tag_re
            .captures_iter(heading.as_str())
            .filter_map(|caps| caps.get(1))
            .map(|name| decode_entities(name.as_str().trim()))
            .collect();

        works.push(Work {
            id: *id,
            fandoms,
            posted,
        });
    }
    Ok(works)
}

/// Fandom names routinely carry `&` and quotes; undo the handful of
/// entities the archive emits in tag text.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
