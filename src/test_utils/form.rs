use scraper::{ElementRef, Html, Selector};

/// The first `<form>` of a rendered page, as the browser and htmx would see it.
pub(crate) struct HtmxForm<'a> {
    element: ElementRef<'a>,
}

impl<'a> HtmxForm<'a> {
    #[track_caller]
    pub(crate) fn first_in(html: &'a Html) -> Self {
        let element = html
            .select(&Selector::parse("form").unwrap())
            .next()
            .expect("No form found");

        Self { element }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    #[track_caller]
    pub(crate) fn assert_posts_to(&self, endpoint: &str) {
        assert_eq!(
            self.attr("hx-post"),
            Some(endpoint),
            "want form to post to {endpoint}"
        );
    }

    /// The input called `name`, after checking that it is required and has the given type.
    #[track_caller]
    pub(crate) fn required_input(&self, name: &str, type_: &str) -> ElementRef<'a> {
        let selector = Selector::parse(&format!("input[name='{name}']")).unwrap();
        let input = self
            .element
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("No input named {name:?}"));

        assert_eq!(input.value().attr("type"), Some(type_), "type of {name:?}");
        assert!(
            input.value().attr("required").is_some(),
            "want {name:?} to be required"
        );

        input
    }

    /// Name and value of each hidden input, in document order.
    pub(crate) fn hidden_fields(&self) -> Vec<(&'a str, &'a str)> {
        self.element
            .select(&Selector::parse("input[type='hidden']").unwrap())
            .map(|input| {
                (
                    input.value().attr("name").unwrap_or_default(),
                    input.value().attr("value").unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Values of the options of the select called `name`, and which of them are selected.
    pub(crate) fn select_options(&self, name: &str) -> (Vec<&'a str>, Vec<&'a str>) {
        let selector = Selector::parse(&format!("select[name='{name}'] option")).unwrap();
        let options: Vec<_> = self.element.select(&selector).collect();
        let values = options
            .iter()
            .map(|option| option.value().attr("value").unwrap_or_default())
            .collect();
        let selected = options
            .iter()
            .filter(|option| option.value().attr("selected").is_some())
            .map(|option| option.value().attr("value").unwrap_or_default())
            .collect();

        (values, selected)
    }

    pub(crate) fn links(&self) -> Vec<&'a str> {
        self.element
            .select(&Selector::parse("a[href]").unwrap())
            .filter_map(|link| link.value().attr("href"))
            .collect()
    }

    #[track_caller]
    pub(crate) fn assert_has_submit_button(&self) {
        let submit = self
            .element
            .select(&Selector::parse("button").unwrap())
            .find(|button| button.value().attr("type") == Some("submit"));

        assert!(submit.is_some(), "want a button with type=\"submit\"");
    }
}
