// src/engine/engine.rs
use tracing::debug;

use crate::core::html::{self, Page, PageNode};
use crate::core::sanitize::strip_line_breaks;
use crate::data::{EntityRecord, PageResult, Record, ReviewRecord, Section};
use crate::engine::types::*;
use crate::error::{ExtractError, MissingSection};

/// Run a compiled spec over one page.
///
/// Zero review containers means the listing is exhausted. Otherwise the
/// metadata record (if any section is found) comes first, followed by every
/// review that has all four fields. Missing sections never fail the page.
pub fn extract<P: Page>(spec: &PageSpec, page: &P, id: &str) -> Result<PageResult, ExtractError> {
    if id.is_empty() {
        return Err(ExtractError::EmptyId);
    }

    let nodes = page.find_all(&spec.review);
    if nodes.is_empty() {
        debug!(id, "no more reviews to parse");
        return Ok(PageResult::EndOfContent);
    }

    let mut out = Vec::with_capacity(nodes.len() + 1);
    if let Some(entity) = extract_entity(spec, page, id) {
        out.push(Record::Entity(entity));
    }

    for (i, node) in nodes.iter().enumerate() {
        match extract_review(spec, node, id) {
            Ok(review) => out.push(Record::Review(review)),
            Err(missing) => debug!(id, index = i, "skipping review: {missing}"),
        }
    }

    Ok(PageResult::Records(out))
}

/// Page-level metadata. Each section is looked up independently and is
/// best-effort; the record exists if at least one section was found.
pub fn extract_entity<P: Page>(spec: &PageSpec, page: &P, id: &str) -> Option<EntityRecord> {
    let about = metadata_field(spec.about.as_ref(), page, Section::About);
    let address = metadata_field(spec.address.as_ref(), page, Section::Address);
    EntityRecord::from_parts(id, about, address)
}

fn metadata_field<P: Page>(field: Option<&Field>, page: &P, section: Section) -> Option<String> {
    // Entity types without this section at all don't log anything.
    let field = field?;
    let found = page
        .find_first(&field.selector)
        .ok_or(MissingSection::new(section))
        .and_then(|node| read_field(&node, field, section));
    match found {
        Ok(v) => {
            debug!("found {section} section");
            Some(v)
        }
        Err(missing) => {
            debug!("no {} section", missing.section);
            None
        }
    }
}

/// One review container, fields read in fixed order: date, rating, title, body.
/// The first absent field aborts this review only.
pub fn extract_review<N: PageNode>(spec: &PageSpec, node: &N, id: &str) -> Result<ReviewRecord, MissingSection> {
    let date = lookup(node, &spec.date, Section::Date)?;
    let rating = lookup(node, &spec.rating, Section::Rating)?;
    let title = lookup(node, &spec.title, Section::Title)?;
    let body = lookup(node, &spec.body, Section::Body)?;

    Ok(ReviewRecord {
        id: s!(id),
        date,
        rating,
        title,
        review: strip_line_breaks(&body),
    })
}

/// Find `field` under `node` and read it.
pub fn lookup<N: PageNode>(node: &N, field: &Field, section: Section) -> Result<String, MissingSection> {
    let found = node.find_first(&field.selector).ok_or(MissingSection::new(section))?;
    read_field(&found, field, section)
}

/// A node that exists is enough for most fields, even when its value is
/// blank. The date and the metadata sections must also carry text.
fn read_field<N: PageNode>(node: &N, field: &Field, section: Section) -> Result<String, MissingSection> {
    let value = match &field.read {
        Read::Text => Some(html::text_of(node).unwrap_or_default()),
        Read::Attr(name) => node.attr(name).map(|v| s!(v.trim())),
        Read::ClassToken(n) => html::class_token(node, *n),
    };
    match value {
        Some(v) if v.is_empty() && blank_is_missing(section) => Err(MissingSection::new(section)),
        Some(v) => Ok(v),
        None => Err(MissingSection::new(section)),
    }
}

fn blank_is_missing(section: Section) -> bool {
    matches!(section, Section::Date | Section::About | Section::Address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse;

    fn spec() -> PageSpec {
        let set = SelectorSet {
            review: s!("div.card"),
            date: FieldSpec::attr("span.date", "title"),
            rating: FieldSpec::class_token("span.bubble", 1),
            title: FieldSpec::text("h3"),
            body: FieldSpec::text("p"),
            about: Some(FieldSpec::text("div.about")),
            address: Some(FieldSpec::text("div.addr span")),
        };
        PageSpec::try_from(&set).unwrap()
    }

    const CARD: &str = r#"<div class="card"><span class="date" title="May 2023"></span>
        <span class="bubble bubble_50"></span><h3>Nice</h3><p>Loved
        it</p></div>"#;

    #[test]
    fn reads_each_field_by_its_rule() {
        let doc = parse(CARD);
        let spec = spec();
        let node = doc.find_first(&spec.review).unwrap();
        let r = extract_review(&spec, &node, "x").unwrap();
        assert_eq!(r.date, "May 2023");
        assert_eq!(r.rating, "bubble_50");
        assert_eq!(r.title, "Nice");
        assert_eq!(r.review, "Loved it");
    }

    #[test]
    fn each_missing_field_is_named() {
        let spec = spec();
        let cases = [
            (r#"<div class="card"><span class="bubble b"></span><h3>t</h3><p>b</p></div>"#, Section::Date),
            (r#"<div class="card"><span class="date" title="d"></span><h3>t</h3><p>b</p></div>"#, Section::Rating),
            (r#"<div class="card"><span class="date" title="d"></span><span class="bubble b"></span><p>b</p></div>"#, Section::Title),
            (r#"<div class="card"><span class="date" title="d"></span><span class="bubble b"></span><h3>t</h3></div>"#, Section::Body),
        ];
        for (html, section) in cases {
            let doc = parse(html);
            let node = doc.find_first(&spec.review).unwrap();
            assert_eq!(extract_review(&spec, &node, "x").unwrap_err().section, section);
        }
    }

    #[test]
    fn blank_date_counts_as_missing() {
        let spec = spec();
        let doc = parse(r#"<div class="card"><span class="date" title="  "></span><span class="bubble b"></span><h3>t</h3><p>b</p></div>"#);
        let node = doc.find_first(&spec.review).unwrap();
        assert_eq!(extract_review(&spec, &node, "x").unwrap_err().section, Section::Date);
    }

    #[test]
    fn blank_title_and_body_keep_the_review() {
        let spec = spec();
        let doc = parse(r#"
            <div class="card"><span class="date" title="d"></span><span class="bubble b"></span><h3></h3><p>b</p></div>
            <div class="card"><span class="date" title="d"></span><span class="bubble b"></span><h3>t</h3><p>
            </p></div>"#);
        let result = extract(&spec, &doc, "x").unwrap();
        let reviews: Vec<_> = result.reviews().collect();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].title, "");
        assert_eq!(reviews[1].title, "t");
        assert_eq!(reviews[1].review, "");
    }

    #[test]
    fn blank_about_is_left_out() {
        let spec = spec();
        let doc = parse(r#"<div class="about">  </div><div class="addr"><span>1 Main St</span></div>"#);
        let e = extract_entity(&spec, &doc, "x").unwrap();
        assert_eq!(e.about, None);
    }

    #[test]
    fn address_alone_still_makes_a_metadata_record() {
        let spec = spec();
        let doc = parse(r#"<div class="addr"><span>1 Main St</span></div>"#);
        let e = extract_entity(&spec, &doc, "x").unwrap();
        assert_eq!(e.about, None);
        assert_eq!(e.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn no_metadata_no_record() {
        let spec = spec();
        let doc = parse("<div></div>");
        assert!(extract_entity(&spec, &doc, "x").is_none());
    }

    #[test]
    fn empty_id_is_rejected() {
        let doc = parse(CARD);
        assert_eq!(extract(&spec(), &doc, ""), Err(ExtractError::EmptyId));
    }
}
