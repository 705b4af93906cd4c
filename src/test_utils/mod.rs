#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod form;
pub(crate) mod response;

pub(crate) use db::get_test_connection_with_user;
pub(crate) use form::HtmxForm;
pub(crate) use response::{
    assert_content_type, assert_hx_redirect, assert_valid_html, get_header, parse_html_document,
    parse_html_fragment,
};
