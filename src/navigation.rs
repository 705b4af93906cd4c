//! The navigation for signed-in pages: a header on wide screens and a tab bar
//! along the bottom on small ones.

use maud::{Markup, html};

use crate::endpoints;

/// The signed-in pages that have a navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Expenses,
    Analysis,
}

impl Page {
    const ALL: [Page; 2] = [Page::Expenses, Page::Analysis];

    fn url(self) -> &'static str {
        match self {
            Page::Expenses => endpoints::EXPENSES_VIEW,
            Page::Analysis => endpoints::ANALYSIS_VIEW,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Page::Expenses => "Expenses",
            Page::Analysis => "Analysis",
        }
    }
}

#[derive(Clone, Copy)]
enum Placement {
    Header,
    TabBar,
}

fn link_style(placement: Placement, is_current: bool) -> &'static str {
    match (placement, is_current) {
        (Placement::Header, true) => "font-semibold text-blue-700 dark:text-blue-500",
        (Placement::Header, false) => {
            "text-gray-900 hover:text-blue-700 dark:text-white dark:hover:text-blue-500"
        }
        (Placement::TabBar, true) => {
            "flex justify-center rounded-lg px-2.5 py-2 text-sm font-semibold \
            bg-blue-50 text-blue-700 dark:bg-blue-900/30 dark:text-blue-200"
        }
        (Placement::TabBar, false) => {
            "flex justify-center rounded-lg px-2.5 py-2 text-sm font-semibold \
            text-gray-600 hover:text-blue-700 dark:text-gray-300 dark:hover:text-blue-200"
        }
    }
}

/// The page links followed by the log-out link.
fn links(current: Page, placement: Placement) -> Markup {
    html! {
        @for page in Page::ALL {
            li
            {
                a
                    href=(page.url())
                    class=(link_style(placement, page == current))
                    aria-current=[(page == current).then_some("page")]
                {
                    (page.title())
                }
            }
        }

        li
        {
            a href=(endpoints::LOG_OUT) class=(link_style(placement, false)) { "Log out" }
        }
    }
}

/// Render the navigation with the link to `current` highlighted.
pub fn nav_bar(current: Page) -> Markup {
    html! {
        nav class="bg-white dark:bg-gray-900"
        {
            div class="flex items-center justify-between max-w-screen-xl mx-auto p-4"
            {
                a href=(endpoints::EXPENSES_VIEW) class="flex items-center gap-3"
                {
                    img src="/static/favicon-128x128.png" alt="" class="h-8";
                    span class="text-2xl font-semibold dark:text-white" { "Budget Tracker" }
                }

                ul class="hidden lg:flex gap-8 font-medium"
                {
                    (links(current, Placement::Header))
                }
            }
        }

        nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden" aria-label="Primary"
        {
            ul
                class="grid grid-cols-3 gap-2 mx-4 mb-4 px-4 py-3 rounded-xl border shadow-lg \
                    bg-white/95 border-gray-200 dark:bg-gray-900/95 dark:border-gray-700"
            {
                (links(current, Placement::TabBar))
            }
        }
    }
}
