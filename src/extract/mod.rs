//! Turns a fetched meetup page into a [`ParsedPage`].
//!
//! The schedule region is located purely by position, so layout changes on
//! the site only need [`SCHEDULE_BLOCKS`] (and the per-block offsets below)
//! to be updated.

pub mod path;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{Capacity, ParsedPage, Schedule};
use path::{own_text, stripped_text, ElementPath};

pub const SCHEDULE_BLOCKS: &str =
    "/html/body/div/div[1]/div/main/div[1]/div/div/div/section[2]/div/div/div[2]";
const MEMBER_KEYWORD: &str = "멤버";

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1").expect("Failed to parse h1 selector")
});

static TEXT_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div, span, p").expect("Failed to parse text block selector")
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("invalid regex: digits"));

struct BlockPaths {
    title: ElementPath,
    date: ElementPath,
    place: ElementPath,
    cost: ElementPath,
    current: ElementPath,
    max: ElementPath,
}

static BLOCK: Lazy<BlockPaths> = Lazy::new(|| {
    let parse = |raw: &str| raw.parse::<ElementPath>().expect("invalid block path");
    BlockPaths {
        title: parse("./h3"),
        date: parse("./div[1]/p"),
        place: parse("./div[2]/p"),
        cost: parse("./div[3]/p"),
        current: parse("./div[4]/span/span[1]"),
        max: parse("./div[4]/span/span[3]"),
    }
});

/// Anything that can read a meetup page.
pub trait Extractor {
    /// Never fails; sections that cannot be read come back empty.
    fn extract(&self, html: &str) -> ParsedPage;
}

/// Extractor for the somoim group page layout.
pub struct SomoimExtractor {
    blocks: ElementPath,
}

impl SomoimExtractor {
    pub fn with_block_path(blocks: ElementPath) -> Self {
        SomoimExtractor { blocks }
    }
}

impl Default for SomoimExtractor {
    fn default() -> Self {
        let blocks = SCHEDULE_BLOCKS
            .parse()
            .expect("schedule block path is a valid element path");
        SomoimExtractor { blocks }
    }
}

impl Extractor for SomoimExtractor {
    fn extract(&self, html: &str) -> ParsedPage {
        let document = Html::parse_document(html);

        let title = page_title(&document);
        let schedules = self.schedules(&document);
        let member_count = member_count(&document);

        debug!(
            title = title.as_deref().unwrap_or("-"),
            schedules = schedules.len(),
            member_count,
            "page extracted"
        );

        ParsedPage {
            title,
            schedules,
            member_count,
        }
    }
}

impl SomoimExtractor {
    fn schedules(&self, document: &Html) -> Vec<Schedule> {
        self.blocks
            .select_document(document)
            .into_iter()
            .enumerate()
            .filter_map(|(index, block)| {
                let schedule = schedule_from_block(block);
                if schedule.is_none() {
                    debug!(index, "skipping incomplete schedule block");
                }
                schedule
            })
            .collect()
    }
}

fn page_title(document: &Html) -> Option<String> {
    document
        .select(&H1_SELECTOR)
        .next()
        .map(stripped_text)
        .filter(|title| !title.is_empty())
}

fn field(block: ElementRef<'_>, path: &ElementPath) -> Option<String> {
    path.first(block).and_then(own_text)
}

fn count(block: ElementRef<'_>, path: &ElementPath) -> Option<u32> {
    field(block, path)?.parse().ok()
}

fn schedule_from_block(block: ElementRef<'_>) -> Option<Schedule> {
    Some(Schedule {
        title: field(block, &BLOCK.title)?,
        date: field(block, &BLOCK.date)?,
        place: field(block, &BLOCK.place)?,
        cost: field(block, &BLOCK.cost)?,
        people: Capacity {
            current: count(block, &BLOCK.current)?,
            max: count(block, &BLOCK.max)?,
        },
    })
}

/// First `div`/`span`/`p` in document order mentioning members with a number.
fn member_count(document: &Html) -> Option<u64> {
    let text = document
        .select(&TEXT_BLOCK_SELECTOR)
        .map(stripped_text)
        .find(|text| text.contains(MEMBER_KEYWORD) && text.chars().any(|c| c.is_ascii_digit()))?;
    DIGITS.find(&text)?.as_str().parse().ok()
}
