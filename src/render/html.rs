use crate::render::views::{PageChrome, View};

/// The rendering collaborator: named view plus shared page chrome in,
/// document body out. Template syntax is outside this core; the built-in
/// renderer emits plain HTML.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &View, chrome: &PageChrome) -> String;
}

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &View, chrome: &PageChrome) -> String {
        match view {
            View::Home(v) => page(&v.title, chrome, format!("<h1>{}</h1><p>{}</p>", escape(&v.title), escape(&v.content))),
            View::About(v) => page(&v.title, chrome, format!("<h1>{}</h1>", escape(&v.title))),
            View::Category(v) => {
                let mut body = format!(
                    "<h1>{}</h1><p>{}</p><p class=\"display\">{}</p>",
                    escape(&v.category.name),
                    escape(&v.category.description),
                    v.display.as_str()
                );
                if v.has_subcategories {
                    body.push_str("<ul class=\"subcategories\">");
                    for sub in &v.subcategories {
                        body.push_str(&format!(
                            "<li><a href=\"/products/{}\">{}</a></li>",
                            escape(&sub.slug),
                            escape(&sub.name)
                        ));
                    }
                    body.push_str("</ul>");
                }
                if v.has_products {
                    body.push_str("<ul class=\"products\">");
                    for product in &v.products {
                        body.push_str(&format!(
                            "<li><a href=\"/products/{}/{}\">{}</a> ${}</li>",
                            escape(&v.category.slug),
                            product.id,
                            escape(&product.name),
                            product.price
                        ));
                    }
                    body.push_str("</ul>");
                } else {
                    body.push_str("<p>No products in this category yet.</p>");
                }
                page(&v.title, chrome, body)
            }
            View::Item(v) => page(
                &v.title,
                chrome,
                format!(
                    "<h1>{}</h1><img src=\"{}\" alt=\"{}\"><p>{}</p><p class=\"price\">${}</p>",
                    escape(&v.product.name),
                    escape(&v.product.image),
                    escape(&v.product.name),
                    escape(&v.product.description),
                    v.product.price
                ),
            ),
            View::NotFound(v) => page(&v.title, chrome, format!("<h1>{}</h1>", escape(&v.title))),
            View::Error(v) => {
                let mut body = format!(
                    "<h1>{}</h1><p>{}</p><p class=\"code\">Status: {}</p>",
                    escape(&v.title),
                    escape(&v.message),
                    v.status_code
                );
                if let Some(cause) = &v.cause {
                    body.push_str(&format!("<pre>{}</pre>", escape(cause)));
                }
                page(&v.title, chrome, body)
            }
        }
    }
}

fn page(title: &str, chrome: &PageChrome, body: String) -> String {
    let mut nav = String::new();
    if !chrome.nav.is_empty() {
        nav.push_str("<nav><ul>");
        for link in &chrome.nav {
            nav.push_str(&format!(
                "<li><a href=\"/products/{}\">{}</a></li>",
                escape(&link.slug),
                escape(&link.name)
            ));
        }
        nav.push_str("</ul></nav>");
    }
    let footer = match chrome.year {
        Some(year) => format!("<footer>&copy; {}</footer>", year),
        None => String::new(),
    };
    format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body>{}{}{}</body></html>",
        escape(title),
        nav,
        body,
        footer
    )
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
