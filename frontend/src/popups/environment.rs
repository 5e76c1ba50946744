use web_sys::window;

/// Routes where a popup would interrupt someone filling in a form.
pub const FORM_ROUTES: [&str; 3] = ["/checkout", "/auth", "/business-details"];

/// Page conditions that decide whether exit intent may be offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    pub is_mobile: bool,
    pub is_form_page: bool,
}

impl Environment {
    /// Reads the live viewport and route. Anything that can't be read counts
    /// as "not mobile, not a form page".
    pub fn current(mobile_breakpoint_px: f64) -> Self {
        Self {
            is_mobile: is_mobile_viewport(mobile_breakpoint_px),
            is_form_page: current_path().map_or(false, |p| is_form_route(&p)),
        }
    }
}

pub fn is_form_route(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    FORM_ROUTES.iter().any(|route| {
        path == *route
            || path
                .strip_prefix(route)
                .map_or(false, |rest| rest.starts_with('/'))
    })
}

pub fn is_mobile_width(width_px: f64, breakpoint_px: f64) -> bool {
    width_px <= breakpoint_px
}

pub fn is_mobile_viewport(breakpoint_px: f64) -> bool {
    let Some(window) = window() else {
        return false;
    };
    let narrow = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map_or(false, |w| is_mobile_width(w, breakpoint_px));
    let coarse_pointer = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map_or(false, |mq| mq.matches());
    narrow || coarse_pointer
}

pub fn current_path() -> Option<String> {
    window()?.location().pathname().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_routes_and_subpaths() {
        assert!(is_form_route("/checkout"));
        assert!(is_form_route("/checkout/"));
        assert!(is_form_route("/auth/login"));
        assert!(is_form_route("/business-details"));
    }

    #[test]
    fn other_routes_are_not_forms() {
        assert!(!is_form_route("/"));
        assert!(!is_form_route("/pricing"));
        assert!(!is_form_route("/checkout-faq"));
        assert!(!is_form_route("/authors"));
    }

    #[test]
    fn mobile_width_uses_inclusive_breakpoint() {
        assert!(is_mobile_width(375.0, 768.0));
        assert!(is_mobile_width(768.0, 768.0));
        assert!(!is_mobile_width(1024.0, 768.0));
    }
}
