use anyhow::Result;
use futures_util::try_join;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use crate::state::app_state::AppState;
use crate::utils::text::date_from_millis;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Fixed pages listed in the main sitemap.
const STATIC_PAGES: [&str; 5] = ["", "about-us", "products", "blogs", "contact-us"];

/// Documents named in the sitemap index.
pub const SITEMAP_DOCUMENTS: [&str; 3] = ["sitemap1.xml", "chemical.xml", "blogs.xml"];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

impl SitemapEntry {
    fn new(
        loc: String,
        modified: Option<i64>,
        changefreq: &'static str,
        priority: &'static str,
    ) -> Self {
        Self {
            loc,
            lastmod: modified.and_then(date_from_millis),
            changefreq,
            priority,
        }
    }
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn document<F>(root: &str, write_children: F) -> Result<String>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new(root).with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;
    write_children(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new(root)))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// `<urlset>` document for the given entries.
pub fn render_urlset(entries: &[SitemapEntry]) -> Result<String> {
    document("urlset", |writer| {
        for entry in entries {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            text_element(writer, "loc", &entry.loc)?;
            if let Some(lastmod) = &entry.lastmod {
                text_element(writer, "lastmod", lastmod)?;
            }
            text_element(writer, "changefreq", entry.changefreq)?;
            text_element(writer, "priority", entry.priority)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }
        Ok(())
    })
}

/// `<sitemapindex>` pointing at each of the site's sitemap documents.
pub fn render_index(locations: &[String]) -> Result<String> {
    document("sitemapindex", |writer| {
        for loc in locations {
            writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
            text_element(writer, "loc", loc)?;
            writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
        }
        Ok(())
    })
}

pub fn index_entries(state: &AppState) -> Vec<String> {
    SITEMAP_DOCUMENTS
        .iter()
        .map(|doc| state.settings.absolute_url(doc))
        .collect()
}

/// Static pages and product categories.
pub async fn pages_entries(state: &AppState) -> Result<Vec<SitemapEntry>> {
    let settings = &state.settings;
    let categories = state.product_categories.all().await?;

    let mut entries: Vec<SitemapEntry> = STATIC_PAGES
        .iter()
        .map(|page| {
            let priority = if page.is_empty() { "1.0" } else { "0.8" };
            SitemapEntry::new(settings.absolute_url(page), None, "weekly", priority)
        })
        .collect();
    entries.extend(categories.iter().filter(|c| !c.slug.trim().is_empty()).map(|c| {
        SitemapEntry::new(settings.absolute_url(&c.slug), c.last_modified(), "weekly", "0.8")
    }));
    Ok(entries)
}

/// Active products.
pub async fn product_entries(state: &AppState) -> Result<Vec<SitemapEntry>> {
    let settings = &state.settings;
    let products = state.products.all_active().await?;
    Ok(products
        .iter()
        .filter(|p| !p.slug.trim().is_empty())
        .map(|p| {
            SitemapEntry::new(settings.absolute_url(&p.slug), p.last_modified(), "monthly", "0.7")
        })
        .collect())
}

/// News categories followed by active posts.
pub async fn blog_entries(state: &AppState) -> Result<Vec<SitemapEntry>> {
    let settings = &state.settings;
    let (categories, posts) = try_join!(state.news_categories.all(), state.news.all_active())?;

    let mut entries: Vec<SitemapEntry> = categories
        .iter()
        .filter_map(|c| {
            c.routable_slug().map(|slug| {
                SitemapEntry::new(settings.absolute_url(slug), c.last_modified(), "weekly", "0.6")
            })
        })
        .collect();
    entries.extend(posts.iter().filter(|p| !p.slug.trim().is_empty()).map(|p| {
        SitemapEntry::new(settings.absolute_url(&p.slug), p.last_modified(), "monthly", "0.6")
    }));
    Ok(entries)
}
