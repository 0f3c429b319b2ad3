//! FAQ extraction from CMS post bodies.
//!
//! FAQ posts are written in the WordPress editor as runs of paragraphs, each
//! opening with a bold question followed by its answer, optionally with a
//! list right after:
//!
//! ```html
//! <p><strong>How long does printing take?</strong> Most orders ship in 3 days.</p>
//! <p><strong>What files do you accept?</strong> We accept:</p>
//! <ul><li>PDF</li><li>TIFF</li></ul>
//! ```
//!
//! Each `<strong>` becomes a question. Its answer is the plain text that
//! follows it inside the same parent (direct text only, so inline markup
//! after the question is not picked up), plus a bulleted rendering of a list
//! immediately after the parent. Entries with an empty question or answer
//! are dropped.

use crate::cms::Post;
use crate::html::{Document, NodeKind};
use serde::Serialize;

pub const BULLET: &str = "\u{2022} ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Extract question/answer pairs from rendered post HTML, in document order.
pub fn parse_faq_content(content: &str) -> Vec<FaqEntry> {
    let doc = Document::parse(content);
    doc.elements_named("strong")
        .into_iter()
        .filter_map(|strong| {
            let question = doc.text(strong).trim().to_string();
            let parent = doc.node(strong).parent?;

            let mut answer = trailing_text(&doc, parent, strong);

            let list = doc
                .next_element_sibling(parent)
                .filter(|&next| matches!(doc.element_name(next), Some("ul" | "ol")));
            if let Some(list) = list {
                let bullets: Vec<String> = doc
                    .descendants_named(list, "li")
                    .into_iter()
                    .map(|li| format!("{}{}", BULLET, doc.text(li).trim()))
                    .collect();
                if !bullets.is_empty() {
                    answer.push_str("\n\n");
                    answer.push_str(&bullets.join("\n"));
                }
            }

            (!question.is_empty() && !answer.is_empty()).then_some(FaqEntry { question, answer })
        })
        .collect()
}

/// The entries of one CMS post, under the post's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqSection {
    pub title: String,
    pub entries: Vec<FaqEntry>,
}

/// Parse every post, keeping post order. Posts with no usable entries are
/// left out.
pub fn sections_from_posts(posts: &[Post]) -> Vec<FaqSection> {
    posts
        .iter()
        .map(|post| FaqSection {
            title: post.title.rendered.clone(),
            entries: parse_faq_content(&post.content.rendered),
        })
        .filter(|section| !section.entries.is_empty())
        .collect()
}

/// Shown when the site is built without a FAQ source.
pub fn fallback_sections() -> Vec<FaqSection> {
    let entry = |question: &str, answer: &str| FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    };
    vec![FaqSection {
        title: "Help & FAQs".to_string(),
        entries: vec![
            entry(
                "How to place an order?",
                "Choose a product, configure it with the calculator and send us your files. We confirm every order by email before printing.",
            ),
            entry(
                "Shipping Information",
                "Orders ship once printed and proofed. Tracking details are emailed as soon as your package leaves the shop.",
            ),
        ],
    }]
}

/// Direct text children of `parent` after `after`, trimmed and space-joined.
fn trailing_text(doc: &Document, parent: usize, after: usize) -> String {
    let children = &doc.node(parent).children;
    let Some(pos) = children.iter().position(|&c| c == after) else {
        return String::new();
    };
    let parts: Vec<&str> = children[pos + 1..]
        .iter()
        .filter_map(|&c| match &doc.node(c).kind {
            NodeKind::Text(t) => Some(t.trim()),
            _ => None,
        })
        .collect();
    parts.join(" ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_question_with_trailing_answer() {
        let faqs = parse_faq_content(
            "<p><strong>How long does printing take?</strong> Most orders ship in 3 days.</p>",
        );
        assert_eq!(
            faqs,
            vec![FaqEntry {
                question: "How long does printing take?".into(),
                answer: "Most orders ship in 3 days.".into(),
            }]
        );
    }

    #[test]
    fn several_questions_in_order() {
        let html = "<p><strong>One?</strong> First.</p>\n<p><strong>Two?</strong> Second.</p>";
        let questions: Vec<String> = parse_faq_content(html)
            .into_iter()
            .map(|f| f.question)
            .collect();
        assert_eq!(questions, vec!["One?", "Two?"]);
    }

    #[test]
    fn following_list_becomes_bullets() {
        let html = "<p><strong>What files do you accept?</strong> We accept:</p>\n\
                    <ul>\n<li>PDF</li>\n<li> TIFF </li>\n</ul>";
        let faqs = parse_faq_content(html);
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].answer, "We accept:\n\n\u{2022} PDF\n\u{2022} TIFF");
    }

    #[test]
    fn ordered_list_also_counts() {
        let html = "<p><strong>Steps?</strong> Do this:</p><ol><li>Upload</li><li>Approve</li></ol>";
        let faqs = parse_faq_content(html);
        assert!(faqs[0].answer.ends_with("\u{2022} Upload\n\u{2022} Approve"));
    }

    #[test]
    fn list_not_directly_after_parent_is_ignored() {
        let html = "<p><strong>Q?</strong> A.</p><p>Other</p><ul><li>x</li></ul>";
        let faqs = parse_faq_content(html);
        assert_eq!(faqs[0].answer, "A.");
    }

    #[test]
    fn question_without_answer_dropped() {
        let html = "<p><strong>Orphan question?</strong></p><p><strong>Real?</strong> Yes.</p>";
        let faqs = parse_faq_content(html);
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].question, "Real?");
    }

    #[test]
    fn list_alone_is_an_answer() {
        let html = "<p><strong>Sizes?</strong></p><ul><li>Small</li></ul>";
        let faqs = parse_faq_content(html);
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].answer, "\n\n\u{2022} Small");
    }

    #[test]
    fn empty_strong_dropped() {
        assert!(parse_faq_content("<p><strong> </strong> text</p>").is_empty());
    }

    #[test]
    fn text_before_question_not_in_answer() {
        let html = "<p>Intro text <strong>Q?</strong> answer</p>";
        assert_eq!(parse_faq_content(html)[0].answer, "answer");
    }

    #[test]
    fn inline_markup_after_question_skipped() {
        // Only direct text children are taken.
        let html = "<p><strong>Q?</strong> Call <a href=\"tel:1\">us</a> today<br>or email.</p>";
        assert_eq!(parse_faq_content(html)[0].answer, "Call today or email.");
    }

    #[test]
    fn entities_decoded() {
        let html = "<p><strong>Can I cancel?</strong> Yes &#8211; until it&#8217;s printed.</p>";
        assert_eq!(
            parse_faq_content(html)[0].answer,
            "Yes \u{2013} until it\u{2019}s printed."
        );
    }

    #[test]
    fn named_entities_decoded_in_question_and_answer() {
        let faqs = parse_faq_content(
            "<p><strong>Caf&eacute; hours?</strong> Open 9&ndash;5, &euro;5 entry &frac12; off.</p>",
        );
        assert_eq!(faqs[0].question, "Caf\u{e9} hours?");
        assert_eq!(faqs[0].answer, "Open 9\u{2013}5, \u{20ac}5 entry \u{bd} off.");
    }

    #[test]
    fn fixture_posts_grouped_by_title() {
        let sections = sections_from_posts(&crate::test_helpers::fixture_posts());
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Ordering", "Shipping & Delivery"]);
        assert_eq!(sections[0].entries.len(), 3);
        assert!(sections[0].entries.iter().any(|e| e.answer.contains("\u{2022} Print-ready PDF")));
    }

    #[test]
    fn sections_follow_post_order_and_skip_empty_posts() {
        let posts = vec![
            crate::test_helpers::post(1, "Ordering", "<p><strong>How?</strong> Online.</p>"),
            crate::test_helpers::post(2, "News", "<p>No questions here.</p>"),
            crate::test_helpers::post(3, "Shipping", "<p><strong>When?</strong> Soon.</p>"),
        ];
        let sections = sections_from_posts(&posts);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Ordering", "Shipping"]);
        assert_eq!(sections[1].entries[0].answer, "Soon.");
    }

    #[test]
    fn fallback_has_sample_questions() {
        let sections = fallback_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].entries[0].question, "How to place an order?");
        assert_eq!(sections[0].entries[1].question, "Shipping Information");
    }

    #[test]
    fn no_strong_no_entries() {
        assert!(parse_faq_content("<p>Just text.</p>").is_empty());
        assert!(parse_faq_content("").is_empty());
    }
}
