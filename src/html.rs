//! Shared page layout, style constants and small view helpers.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::endpoints;

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day], [year]");

/// Inline text links.
pub const LINK_STYLE: &str = "underline text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400";

/// Full-width submit buttons.
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 rounded text-white \
    bg-blue-500 dark:bg-blue-600 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 disabled:bg-blue-700";

/// The delete button in each expense row, drawn as a red link.
pub const BUTTON_DELETE_STYLE: &str = "underline cursor-pointer bg-transparent border-none \
    text-red-600 hover:text-red-500 dark:text-red-500 dark:hover:text-red-400";

pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

/// Text inputs and selects.
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm border \
    text-gray-900 bg-gray-50 border-gray-300 focus:ring-blue-600 focus:border-blue-600 \
    disabled:text-gray-500 dark:text-white dark:bg-gray-700 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:dark:ring-blue-500 focus:dark:border-blue-500";

pub const TABLE_HEADER_STYLE: &str =
    "text-xs uppercase text-gray-700 bg-gray-50 dark:text-gray-400 dark:bg-gray-700";
pub const TABLE_ROW_STYLE: &str = "border-b bg-white dark:bg-gray-800 dark:border-gray-700";
pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

/// The pill a category name is shown in. The background is the category colour.
pub const CATEGORY_BADGE_STYLE: &str =
    "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-semibold";

/// The column that holds the content of a signed-in page.
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center mx-auto px-6 py-8 lg:py-5 text-gray-900 dark:text-white";

const ALERT_CONTAINER_STYLE: &str = "position: fixed; bottom: 1rem; left: 50%; \
    transform: translateX(-50%); z-index: 9999;";

/// Extra scripts a page adds to `<head>`.
pub enum HeadElement {
    /// The path or URL of a script file.
    ScriptLink(String),
    /// Inline JavaScript.
    ScriptSource(PreEscaped<String>),
}

/// The document every page is rendered into.
///
/// The body carries the htmx `response-targets` extension and the empty
/// `#alert-container` that alerts are swapped into.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Budget Tracker" }
                link rel="icon" type="image/png" href="/static/favicon-128x128.png";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx-2.0.8-min.js" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" {}
                style { (PreEscaped(INDICATOR_CSS)) }

                @for element in head_elements {
                    @match element {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::ScriptSource(source) => script { (source) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="min-h-screen bg-gray-50 dark:bg-gray-900 pb-20 lg:pb-0"
            {
                (content)

                div id="alert-container" class="hidden w-full max-w-md px-4" style=(ALERT_CONTAINER_STYLE) {}
            }
        }
    }
}

/// Show `.htmx-indicator` children only while their `#indicator` parent has a request in flight.
const INDICATOR_CSS: &str = "#indicator.htmx-indicator, #indicator .htmx-indicator { display: none; } \
    #indicator.htmx-request.htmx-indicator, #indicator.htmx-request .htmx-indicator { display: inline; }";

/// A full-page error with the status `code` in large type.
pub fn error_view(title: &str, code: &str, description: &str, fix: &str) -> Markup {
    let content = html! {
        main class="mx-auto max-w-screen-sm px-4 py-16 text-center text-gray-900 dark:text-white"
        {
            h1 class="mb-4 text-7xl lg:text-9xl font-extrabold text-blue-600 dark:text-blue-500"
            {
                (code)
            }
            p class="mb-4 text-3xl font-bold" { (description) }
            p class="mb-8 text-xl" { (fix) }
            a href=(endpoints::EXPENSES_VIEW) class=(BUTTON_PRIMARY_STYLE) { "Back to my expenses" }
        }
    };

    base(title, &[], &content)
}

/// The centred card that holds the log-in and registration forms.
pub fn auth_card(heading: &str, form: &Markup) -> Markup {
    html! {
        main class="flex flex-col items-center justify-center mx-auto px-6 py-8"
        {
            p class="flex items-center gap-2 mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                img class="w-8 h-8" src="/static/favicon-128x128.png" alt="";
                "Budget Tracker"
            }

            div class="w-full sm:max-w-md p-6 sm:p-8 space-y-4 rounded-lg shadow bg-white dark:bg-gray-800"
            {
                h1 class="text-xl md:text-2xl font-bold text-gray-900 dark:text-white" { (heading) }
                (form)
            }
        }
    }
}

/// A required, labelled `<input>` with an optional error message under it.
///
/// The input's `id` is its `name`.
pub struct Field<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub type_: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub min_length: Option<u8>,
    pub autofocus: bool,
    pub error: Option<&'a str>,
}

impl<'a> Field<'a> {
    /// The email field of the log-in and registration forms.
    pub fn email(value: &'a str, error: Option<&'a str>) -> Self {
        Self {
            name: "email",
            label: "Email",
            type_: "email",
            value,
            placeholder: "name@example.com",
            min_length: None,
            autofocus: true,
            error,
        }
    }

    /// A password field that never echoes a previous value back.
    pub fn password(name: &'a str, label: &'a str, error: Option<&'a str>) -> Self {
        Self {
            name,
            label,
            type_: "password",
            value: "",
            placeholder: "••••••••",
            min_length: None,
            autofocus: error.is_some(),
            error,
        }
    }

    pub fn min_length(self, min_length: u8) -> Self {
        Self {
            min_length: Some(min_length),
            ..self
        }
    }

    pub fn render(&self) -> Markup {
        html! {
            div
            {
                label for=(self.name) class=(FORM_LABEL_STYLE) { (self.label) }

                input
                    type=(self.type_)
                    name=(self.name)
                    id=(self.name)
                    value=(self.value)
                    placeholder=(self.placeholder)
                    minlength=[self.min_length]
                    autofocus[self.autofocus]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                @if let Some(error) = self.error {
                    p class="text-red-500 text-base" { (error) }
                }
            }
        }
    }
}

/// A small spinning ring, shown next to a button label while htmx waits for a response.
pub fn loading_spinner() -> Markup {
    html! {
        span
            aria-hidden="true"
            class="inline-block w-4 h-4 me-2 align-middle rounded-full border-2 \
                border-white border-t-transparent animate-spin"
        {}
    }
}

/// A link styled with [LINK_STYLE].
pub fn link(url: &str, text: &str) -> Markup {
    html! {
        a href=(url) class=(LINK_STYLE) { (text) }
    }
}

/// Format `number` as dollars and cents, e.g. "$1,234.50" or "-$3.00".
pub fn format_currency(number: f64) -> String {
    static FORMATTER: OnceLock<Option<Formatter>> = OnceLock::new();

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::currency("$")
            .inspect_err(|error| tracing::error!("could not create currency formatter: {error:?}"))
            .ok()
            .map(|formatter| formatter.precision(Precision::Decimals(2)))
    });

    let sign = if number < 0.0 { "-" } else { "" };
    let magnitude = number.abs();

    let formatted_string = match formatter {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        Some(formatter) if magnitude > 0.0 => formatter.fmt_string(magnitude),
        _ => format!("${magnitude:.2}"),
    };

    format!("{sign}{}", pad_cents(formatted_string))
}

/// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3".
fn pad_cents(formatted_string: String) -> String {
    let decimals = formatted_string
        .rfind('.')
        .map(|dot| formatted_string.len() - dot - 1);

    match decimals {
        Some(decimals) if decimals >= 2 => formatted_string,
        Some(decimals) => formatted_string + &"0".repeat(2 - decimals),
        None => formatted_string + ".00",
    }
}

/// Format `date` for display, e.g. "Jan 05, 2024".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
