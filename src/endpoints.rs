//! Route paths. Pages are served at the top level and htmx endpoints under `/api`.
//!
//! Fill in a path parameter such as `{expense_id}` with [format_endpoint].

/// The root route which redirects to the expenses page or log in page.
pub const ROOT: &str = "/";
/// The page for recording and listing a user's expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page with summary cards and charts for a user's expenses.
pub const ANALYSIS_VIEW: &str = "/analysis";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to access users.
pub const USERS: &str = "/api/users";
/// The route to create expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to access a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";

/// Replace the first `{parameter}` in `endpoint_path` with `id`.
///
/// Returns `endpoint_path` unchanged if it has no parameter. An unclosed
/// parameter is treated as running to the end of the path.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };
    let end = endpoint_path[start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| start + offset + 1);

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use super::*;

    #[test]
    fn every_route_parses_as_a_uri() {
        let routes = [
            ROOT,
            EXPENSES_VIEW,
            ANALYSIS_VIEW,
            REGISTER_VIEW,
            LOG_IN_VIEW,
            INTERNAL_ERROR_VIEW,
            STATIC,
            LOG_IN_API,
            LOG_OUT,
            USERS,
            EXPENSES_API,
            EXPENSE,
        ];

        for route in routes {
            assert!(route.parse::<Uri>().is_ok(), "{route} is not a valid URI");
        }
    }

    #[test]
    fn fills_in_expense_id() {
        assert_eq!(format_endpoint(EXPENSE, 42), "/api/expenses/42");
    }

    #[test]
    fn parameter_can_sit_between_segments() {
        assert_eq!(format_endpoint("/api/expenses/{expense_id}/edit", 7), "/api/expenses/7/edit");
    }

    #[test]
    fn path_without_parameter_is_unchanged() {
        assert_eq!(format_endpoint(EXPENSES_API, 1), EXPENSES_API);
    }

    #[test]
    fn unclosed_parameter_runs_to_end() {
        assert_eq!(format_endpoint("/api/expenses/{expense_id", 3), "/api/expenses/3");
    }
}
