use crate::core::selectors::SpeakerSelectors;
use crate::domain::model::SpeakerRecord;
use crate::utils::error::{Result, ScrapeError};
use scraper::ElementRef;

pub const DEFAULT_RELATIVE_MARKER: &str = "..";
pub const DEFAULT_PLACEHOLDER_LINK: &str = "index.html#";

/// Maps one speaker node to a [`SpeakerRecord`].
pub struct SpeakerExtractor {
    selectors: SpeakerSelectors,
    base_url: String,
    relative_marker: String,
    placeholder_link: String,
}

impl SpeakerExtractor {
    pub fn new(selectors: SpeakerSelectors, base_url: impl Into<String>) -> Self {
        Self {
            selectors,
            base_url: base_url.into(),
            relative_marker: DEFAULT_RELATIVE_MARKER.to_string(),
            placeholder_link: DEFAULT_PLACEHOLDER_LINK.to_string(),
        }
    }

    pub fn with_relative_marker(mut self, marker: impl Into<String>) -> Self {
        self.relative_marker = marker.into();
        self
    }

    pub fn with_placeholder_link(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder_link = placeholder.into();
        self
    }

    pub fn extract(&self, node: ElementRef<'_>) -> Result<SpeakerRecord> {
        let name = self.required_text(node, &self.selectors.name, "name")?;
        if name.is_empty() {
            return Err(ScrapeError::extraction("name", "speaker heading is empty"));
        }

        let role = self.required_text(node, &self.selectors.role, "role")?;

        let image = node
            .select(&self.selectors.image)
            .next()
            .ok_or_else(|| ScrapeError::extraction("image", "no image element found"))?;
        let src = image
            .value()
            .attr("src")
            .ok_or_else(|| ScrapeError::extraction("image", "image element has no src"))?;

        Ok(SpeakerRecord {
            name,
            role,
            image_link: self.absolute_image_link(src),
            social_links: self.social_links(node),
        })
    }

    /// 以字串取代的方式把相對路徑標記換成網站根網址（不做 URL 解析）
    pub fn absolute_image_link(&self, src: &str) -> String {
        if self.relative_marker.is_empty() {
            return src.to_string();
        }
        src.replace(&self.relative_marker, &self.base_url)
    }

    fn social_links(&self, node: ElementRef<'_>) -> Vec<String> {
        node.select(&self.selectors.social)
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter(|href| *href != self.placeholder_link)
            .map(String::from)
            .collect()
    }

    fn required_text(
        &self,
        node: ElementRef<'_>,
        selector: &scraper::Selector,
        field: &str,
    ) -> Result<String> {
        node.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .ok_or_else(|| ScrapeError::extraction(field, "no matching element found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fetcher::SpeakerPage;
    use crate::core::selectors::SelectorConfig;

    fn speaker_item(name: &str, role: &str, image: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}" class="speakers-list_social-link w-inline-block"></a>"#, href))
            .collect();
        format!(
            r#"<div class="speakers-list_item">
  <div class="speakers-list_item-image-wrapper"><img src="{image}" loading="lazy" alt=""></div>
  <div class="margin-bottom margin-small">
    <div><h3 class="speakers-list_item-heading">{name}</h3></div>
    <div>{role}</div>
  </div>
  <div class="w-layout-grid speakers-list_social-list">{anchors}</div>
</div>"#
        )
    }

    fn page_with(items: &[String]) -> SpeakerPage {
        let html = format!(
            r#"<html><body><div class="speakers-list_component"><div class="speakers-list_list">{}</div></div></body></html>"#,
            items.join("\n")
        );
        let selectors = SelectorConfig::default().compile().unwrap();
        SpeakerPage::parse(&html, selectors.item)
    }

    fn extractor(base_url: &str) -> SpeakerExtractor {
        SpeakerExtractor::new(SelectorConfig::default().compile().unwrap(), base_url)
    }

    #[test]
    fn test_extracts_all_items_in_document_order() {
        let items: Vec<String> = ["Ada", "Grace", "Linus"]
            .iter()
            .map(|n| speaker_item(n, "Speaker", "../images/x.png", &[]))
            .collect();
        let page = page_with(&items);
        let ex = extractor("https://example.org");

        let names: Vec<String> = page
            .nodes()
            .into_iter()
            .map(|node| ex.extract(node).unwrap().name)
            .collect();
        assert_eq!(names, vec!["Ada", "Grace", "Linus"]);
    }

    #[test]
    fn test_extracts_all_fields() {
        let page = page_with(&[speaker_item(
            "Ada Lovelace",
            "Analyst, Engines Ltd",
            "../images/ada.png",
            &["https://twitter.com/ada", "https://linkedin.com/in/ada"],
        )]);
        let ex = extractor("https://interaction24.ixda.org");

        let record = ex.extract(page.nodes()[0]).unwrap();
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.role, "Analyst, Engines Ltd");
        assert_eq!(record.image_link, "https://interaction24.ixda.org/images/ada.png");
        assert_eq!(
            record.social_links,
            vec!["https://twitter.com/ada", "https://linkedin.com/in/ada"]
        );
    }

    #[test]
    fn test_placeholder_links_are_dropped_and_order_kept() {
        let page = page_with(&[speaker_item(
            "Ada",
            "Speaker",
            "../images/x.png",
            &[
                "index.html#",
                "https://b.example/ada",
                "index.html#",
                "https://a.example/ada",
                "https://b.example/ada",
            ],
        )]);
        let record = extractor("https://example.org").extract(page.nodes()[0]).unwrap();
        assert_eq!(
            record.social_links,
            vec![
                "https://b.example/ada",
                "https://a.example/ada",
                "https://b.example/ada"
            ]
        );
    }

    #[test]
    fn test_image_link_rewrite() {
        let ex = extractor("https://example.org");
        assert_eq!(
            ex.absolute_image_link("../images/x.png"),
            "https://example.org/images/x.png"
        );
        assert_eq!(
            ex.absolute_image_link("https://cdn.example/x.png"),
            "https://cdn.example/x.png"
        );
    }

    #[test]
    fn test_missing_heading_is_extraction_error() {
        let item = r#"<div class="speakers-list_item">
  <div class="speakers-list_item-image-wrapper"><img src="../a.png"></div>
  <div class="margin-bottom margin-small"><div>x</div><div>Speaker</div></div>
</div>"#
            .to_string();
        let page = page_with(&[item]);
        let err = extractor("https://example.org")
            .extract(page.nodes()[0])
            .unwrap_err();
        match err {
            ScrapeError::Extraction { field, .. } => assert_eq!(field, "name"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_image_src_is_extraction_error() {
        let item = r#"<div class="speakers-list_item">
  <div class="speakers-list_item-image-wrapper"><img alt=""></div>
  <div class="margin-bottom margin-small">
    <div><h3 class="speakers-list_item-heading">Ada</h3></div><div>Speaker</div>
  </div>
</div>"#
            .to_string();
        let page = page_with(&[item]);
        let err = extractor("https://example.org")
            .extract(page.nodes()[0])
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Extraction { ref field, .. } if field == "image"));
    }

    #[test]
    fn test_anchor_without_href_is_ignored() {
        let item = r#"<div class="speakers-list_item">
  <div class="speakers-list_item-image-wrapper"><img src="../a.png"></div>
  <div class="margin-bottom margin-small">
    <div><h3 class="speakers-list_item-heading">Ada</h3></div><div>Speaker</div>
  </div>
  <div class="w-layout-grid speakers-list_social-list"><a></a><a href="https://x.example"></a></div>
</div>"#
            .to_string();
        let page = page_with(&[item]);
        let record = extractor("https://example.org").extract(page.nodes()[0]).unwrap();
        assert_eq!(record.social_links, vec!["https://x.example"]);
    }
}
