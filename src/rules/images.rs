//! Alternative-text rule for `img`, `input[type="image"]`, `area`, and
//! `svg` elements.
//!
//! Each candidate is classified by purpose (interactive, decorative,
//! image-map area, inline SVG, plain content) and its alternative text is
//! judged against that purpose. Interactive images and image-map areas are
//! held to a stricter standard than plain content: an empty `alt` fails
//! there, where a plain image only warns.

use crate::context::DocumentContext;
use crate::dom::style::{inline_style, is_visible};
use crate::dom::{closest, has_interactive_host, urls};
use crate::verdict::Verdict;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Alt-text values that carry no information. Checked case-insensitively
/// against the trimmed full string.
const MEANINGLESS_ALT_WORDS: &[&str] = &[
    "image", "img", "picture", "photo", "icon", "banner", "logo", "untitled",
    "그림", "이미지", "사진", "아이콘", "배너", "로고", "제목없음",
];

/// Result record for one inspected image node.
#[derive(Debug)]
pub struct ImageCheck<'a> {
    /// The inspected node
    pub element: ElementRef<'a>,
    /// Lowercased tag name
    pub tag: String,
    /// Whether the node was hidden at evaluation time
    pub hidden: bool,
    /// `src`, resolved against the document base
    pub src: String,
    /// Raw `alt` attribute; `None` when absent
    pub alt: Option<String>,
    /// Raw `longdesc` attribute
    pub longdesc: Option<String>,
    /// Verdict
    pub valid: Verdict,
    /// Findings, in evaluation order
    pub issues: Vec<String>,
    /// Sits inside (or is) a link/button, has a click handler, or shows a
    /// pointer cursor
    pub interactive: bool,
    /// Marked `role="presentation"` or `role="none"`
    pub decorative: bool,
    /// Alt text matched the meaningless-text patterns
    pub meaningless_alt: bool,
    /// `<title>` child text, SVG only
    pub svg_title: String,
    /// `<desc>` child text, SVG only
    pub svg_desc: String,
    /// The node is an image-map `area`
    pub image_map_area: bool,
    /// The `img[usemap]` host of an image-map area, when resolvable
    pub map_host: Option<ElementRef<'a>>,
}

fn is_meaningless_alt(alt: &str, filename_re: &Regex) -> bool {
    let trimmed = alt.trim();
    MEANINGLESS_ALT_WORDS
        .iter()
        .any(|w| trimmed.eq_ignore_ascii_case(w))
        || filename_re.is_match(trimmed)
}

fn child_text(el: ElementRef<'_>, tag: &str) -> String {
    let selector = Selector::parse(tag).expect("valid selector");
    el.select(&selector)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn map_host<'a>(ctx: &'a DocumentContext, area: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let map = closest(area, |e| e.value().name() == "map")?;
    let name = map.value().attr("name")?;
    let usemap = format!("#{}", name);
    let selector = Selector::parse("img[usemap]").expect("valid selector");
    ctx.document()
        .select(&selector)
        .find(|img| img.value().attr("usemap") == Some(usemap.as_str()))
}

/// Audit every image-bearing node in the document.
pub fn check_images<'a>(ctx: &'a DocumentContext) -> Vec<ImageCheck<'a>> {
    let selector =
        Selector::parse("img, input[type=\"image\"], area, svg").expect("valid selector");
    let filename_re =
        Regex::new(r"(?i)^[a-z0-9_-]+\.(jpg|jpeg|png|gif|webp)$").expect("valid regex");

    ctx.document()
        .select(&selector)
        .map(|img| {
            let value = img.value();
            let tag = value.name().to_string();
            let src = urls::resolve(value.attr("src").unwrap_or(""), ctx.base_url());
            let alt = value.attr("alt").map(str::to_string);
            let longdesc = value.attr("longdesc").map(str::to_string);

            let (svg_title, svg_desc) = if tag == "svg" {
                (child_text(img, "title"), child_text(img, "desc"))
            } else {
                (String::new(), String::new())
            };

            let image_map_area = tag == "area";
            let host = if image_map_area { map_host(ctx, img) } else { None };

            let interactive = has_interactive_host(img)
                || value.attr("onclick").is_some()
                || inline_style(img, "cursor").as_deref() == Some("pointer");
            let decorative =
                matches!(value.attr("role"), Some("presentation") | Some("none"));
            let meaningless_alt = alt
                .as_deref()
                .map(|a| is_meaningless_alt(a, &filename_re))
                .unwrap_or(false);

            let mut valid = Verdict::Pass;
            let mut issues = Vec::new();

            if tag == "svg" {
                let has_name = alt.as_deref().map_or(false, |a| !a.is_empty())
                    || !svg_title.is_empty()
                    || value.attr("aria-label").map_or(false, |a| !a.is_empty())
                    || value.attr("aria-labelledby").map_or(false, |a| !a.is_empty());
                let decorative_svg = matches!(
                    value.attr("role"),
                    Some("img") | Some("presentation")
                ) || value.attr("aria-hidden") == Some("true");

                if !decorative_svg && !has_name {
                    valid = Verdict::Fail;
                    issues.push(
                        "SVG has no accessible name - needs <title>, alt, or aria-label"
                            .to_string(),
                    );
                }
            } else if image_map_area {
                match alt.as_deref() {
                    None => {
                        valid = Verdict::Fail;
                        issues.push("image map area is missing an alt attribute".to_string());
                    }
                    Some("") => {
                        valid = Verdict::Fail;
                        issues.push(
                            "image map area has an empty alt - describe the area's target or function"
                                .to_string(),
                        );
                    }
                    Some(_) if meaningless_alt => {
                        valid = Verdict::Warning;
                        issues.push(
                            "image map area alt is meaningless - describe the link target or function"
                                .to_string(),
                        );
                    }
                    Some(_) => {}
                }
            } else {
                match alt.as_deref() {
                    None => {
                        valid = Verdict::Fail;
                        issues.push("missing alt attribute".to_string());
                    }
                    Some(a) if interactive => {
                        if a.is_empty() {
                            valid = Verdict::Fail;
                            issues.push("interactive image has an empty alt".to_string());
                        } else if meaningless_alt {
                            valid = Verdict::Fail;
                            issues.push("interactive image has a meaningless alt".to_string());
                        }
                    }
                    Some(a) if decorative => {
                        if !a.is_empty() {
                            valid = Verdict::Warning;
                            issues.push("decorative image has unnecessary alt text".to_string());
                        }
                    }
                    Some("") => {
                        valid = Verdict::Warning;
                        issues.push(
                            "alt is empty - add role=\"presentation\" if decorative, or describe the image"
                                .to_string(),
                        );
                    }
                    Some(_) if meaningless_alt => {
                        valid = Verdict::Warning;
                        issues.push(
                            "meaningless alt text - describe the image's purpose and content"
                                .to_string(),
                        );
                    }
                    Some(_) => {}
                }

                // longdesc: syntactic validation only, no network request
                if let Some(ld) = longdesc.as_deref() {
                    if urls::is_resolvable(ld, ctx.base_url()) {
                        issues.push(
                            "detailed description provided for complex image (longdesc)"
                                .to_string(),
                        );
                    } else {
                        if valid == Verdict::Pass {
                            valid = Verdict::Warning;
                        }
                        issues.push("longdesc URL is not valid".to_string());
                    }
                }
            }

            ImageCheck {
                element: img,
                hidden: !is_visible(img),
                tag,
                src,
                alt,
                longdesc,
                valid,
                issues,
                interactive,
                decorative,
                meaningless_alt,
                svg_title,
                svg_desc,
                image_map_area,
                map_host: host,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Vec<ImageCheck<'static>> {
        // Leak so results can borrow; fine in tests.
        let ctx: &'static DocumentContext =
            Box::leak(Box::new(DocumentContext::parse_with_url(
                html,
                "https://example.com/page.html",
            )));
        check_images(ctx)
    }

    #[test]
    fn missing_alt_fails() {
        let results = run(r#"<img src="b.jpg">"#);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].valid, Verdict::Fail);
        assert!(results[0].issues.iter().any(|i| i == "missing alt attribute"));
        assert_eq!(results[0].src, "https://example.com/b.jpg");
    }

    #[test]
    fn descriptive_alt_passes_with_no_issues() {
        let results = run(r#"<img src="chart.png" alt="Q4 revenue by region">"#);
        assert_eq!(results[0].valid, Verdict::Pass);
        assert!(results[0].issues.is_empty());
    }

    #[test]
    fn empty_alt_on_plain_image_warns() {
        let results = run(r#"<img src="a.png" alt="">"#);
        assert_eq!(results[0].valid, Verdict::Warning);
    }

    #[test]
    fn meaningless_alt_word_and_filename_warn() {
        let results = run(concat!(
            r#"<img src="a.png" alt="image">"#,
            r#"<img src="b.png" alt="hero-banner.jpg">"#,
            r#"<img src="c.png" alt="이미지">"#,
        ));
        for r in &results {
            assert_eq!(r.valid, Verdict::Warning, "alt {:?}", r.alt);
            assert!(r.meaningless_alt);
        }
    }

    #[test]
    fn interactive_image_empty_alt_fails() {
        let results = run(r#"<a href="/home"><img src="home.png" alt=""></a>"#);
        assert_eq!(results[0].valid, Verdict::Fail);
        assert!(results[0].interactive);
    }

    #[test]
    fn interactive_image_meaningless_alt_fails() {
        let results = run(r#"<button><img src="x.png" alt="icon"></button>"#);
        assert_eq!(results[0].valid, Verdict::Fail);
    }

    #[test]
    fn onclick_and_pointer_cursor_count_as_interactive() {
        let results = run(concat!(
            r#"<img src="a.png" alt="" onclick="go()">"#,
            r#"<img src="b.png" alt="" style="cursor: pointer">"#,
        ));
        assert!(results.iter().all(|r| r.interactive));
        assert!(results.iter().all(|r| r.valid == Verdict::Fail));
    }

    #[test]
    fn decorative_image_with_alt_warns_without_alt_passes() {
        let results = run(concat!(
            r#"<img src="a.png" role="presentation" alt="decoration">"#,
            r#"<img src="b.png" role="presentation" alt="">"#,
        ));
        assert_eq!(results[0].valid, Verdict::Warning);
        assert_eq!(results[1].valid, Verdict::Pass);
    }

    #[test]
    fn map_area_empty_alt_fails_unlike_plain_images() {
        let results = run(concat!(
            r##"<img src="map.png" usemap="#nav" alt="navigation map">"##,
            r#"<map name="nav"><area shape="rect" href="/a" alt=""></map>"#,
        ));
        let area = results.iter().find(|r| r.image_map_area).unwrap();
        assert_eq!(area.valid, Verdict::Fail);
        assert!(area.map_host.is_some());
    }

    #[test]
    fn map_area_missing_alt_fails_and_meaningless_warns() {
        let results = run(concat!(
            r#"<map name="m"><area href="/a">"#,
            r#"<area href="/b" alt="icon"></map>"#,
        ));
        assert_eq!(results[0].valid, Verdict::Fail);
        assert_eq!(results[1].valid, Verdict::Warning);
    }

    #[test]
    fn svg_without_name_fails_with_title_passes() {
        let results = run(concat!(
            "<svg></svg>",
            "<svg><title>Sales trend</title><desc>Rising</desc></svg>",
            r#"<svg aria-hidden="true"></svg>"#,
            r#"<svg aria-label="Donut chart"></svg>"#,
        ));
        assert_eq!(results[0].valid, Verdict::Fail);
        assert_eq!(results[1].valid, Verdict::Pass);
        assert_eq!(results[1].svg_title, "Sales trend");
        assert_eq!(results[1].svg_desc, "Rising");
        assert_eq!(results[2].valid, Verdict::Pass);
        assert_eq!(results[3].valid, Verdict::Pass);
    }

    #[test]
    fn valid_longdesc_keeps_pass_and_notes_it() {
        let results = run(r#"<img src="chart.jpg" alt="Sales chart" longdesc="chart-desc.html">"#);
        assert_eq!(results[0].valid, Verdict::Pass);
        assert!(results[0]
            .issues
            .iter()
            .any(|i| i.contains("longdesc")));
    }

    #[test]
    fn malformed_longdesc_downgrades_pass_to_warning_only() {
        let ctx: &'static DocumentContext = Box::leak(Box::new(DocumentContext::parse(
            r#"<img src="a.jpg" alt="fine" longdesc="no base no scheme">"#,
        )));
        let results = check_images(ctx);
        assert_eq!(results[0].valid, Verdict::Warning);
        assert!(results[0].issues.iter().any(|i| i.contains("longdesc URL")));

        // An already failing image is not upgraded or further downgraded.
        let ctx: &'static DocumentContext = Box::leak(Box::new(DocumentContext::parse(
            r#"<img src="a.jpg" longdesc="no base no scheme">"#,
        )));
        let results = check_images(ctx);
        assert_eq!(results[0].valid, Verdict::Fail);
    }

    #[test]
    fn hidden_images_are_reported_with_hidden_flag() {
        let results = run(r#"<img src="a.png" alt="ok" style="display: none">"#);
        assert!(results[0].hidden);
        assert_eq!(results[0].valid, Verdict::Pass);
    }

    #[test]
    fn results_follow_document_order() {
        let results = run(concat!(
            r#"<img src="1.png" alt="first">"#,
            r#"<svg><title>t</title></svg>"#,
            r#"<img src="2.png" alt="second">"#,
        ));
        assert_eq!(results[0].src, "https://example.com/1.png");
        assert_eq!(results[1].tag, "svg");
        assert_eq!(results[2].src, "https://example.com/2.png");
    }
}
