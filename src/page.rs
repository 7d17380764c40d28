use calendar_widget::CONTAINER_ID;
use maud::{html, DOCTYPE};

const WIDGET_STYLESHEET: &str = "https://uicdn.toast.com/calendar/latest/toastui-calendar.min.css";
const WIDGET_SCRIPT: &str = "https://uicdn.toast.com/calendar/latest/toastui-calendar.min.js";
const WRAPPER_ID: &str = "calendar-container";

/// Stylesheet produced by the CSS build tool, when an assets directory is served.
pub const STYLESHEET_PATH: &str = "/assets/output.css";

/// The HTML document hosting the calendar, and the element ids it declares.
#[derive(Debug, Clone)]
pub struct Page {
    pub html: String,
    pub element_ids: Vec<String>,
}

pub fn render(stylesheet: Option<&str>) -> Page {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Calendar" }
                link rel="stylesheet" href=(WIDGET_STYLESHEET);
                @if let Some(href) = stylesheet {
                    link rel="stylesheet" href=(href);
                }
                script src=(WIDGET_SCRIPT) {}
            }
            body class="bg-neutral-100 dark:bg-neutral-900" {
                div id=(WRAPPER_ID) class="flex flex-col w-full h-screen p-1" {
                    div id=(CONTAINER_ID) class="w-full h-full bg-white dark:bg-neutral-800 dark:text-white lg:rounded-lg shadow-xl" {}
                }
                script src="/calendar.js" {}
            }
        }
    };

    Page {
        html: markup.into_string(),
        element_ids: vec![WRAPPER_ID.to_string(), CONTAINER_ID.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_calendar_container() {
        let page = render(None);

        assert_eq!(page.element_ids, ["calendar-container", CONTAINER_ID]);
        assert!(page.html.starts_with("<!DOCTYPE html>"));
        assert!(page
            .html
            .contains(r#"<div id="calendar-container" class="flex flex-col w-full h-screen p-1"><div id="calendar" class="#));
        assert!(page.html.contains(r#"<script src="/calendar.js"></script>"#));
        assert!(!page.html.contains(STYLESHEET_PATH));
    }

    #[test]
    fn declared_ids_are_present_in_markup() {
        let page = render(None);

        for id in &page.element_ids {
            assert!(page.html.contains(&format!(r#"id="{id}""#)), "{id} missing");
        }
    }

    #[test]
    fn widget_library_loads_before_bootstrap() {
        let html = render(None).html;

        let library = html.find(WIDGET_SCRIPT).unwrap();
        let bootstrap = html.find("/calendar.js").unwrap();
        assert!(library < bootstrap);
    }

    #[test]
    fn links_compiled_stylesheet_when_given() {
        let page = render(Some(STYLESHEET_PATH));
        assert!(page
            .html
            .contains(r#"<link rel="stylesheet" href="/assets/output.css">"#));
    }

    #[test]
    fn stylesheet_href_is_attribute_escaped() {
        let page = render(Some(r#"/x.css" onload="alert(1)"#));

        assert!(page
            .html
            .contains(r#"href="/x.css&quot; onload=&quot;alert(1)""#));
        assert!(!page.html.contains(r#"onload="alert(1)""#));
    }
}
