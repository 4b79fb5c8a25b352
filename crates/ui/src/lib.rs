pub fn module_ready() -> bool {
    true
}

pub fn index_html() -> &'static str {
    include_str!("../static/index.html")
}

pub fn styles_css() -> &'static str {
    include_str!("../static/styles.css")
}

pub fn app_js() -> &'static str {
    include_str!("../static/app.js")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_bundle_contains_index_html() {
        let html = index_html();

        assert!(html.contains("<!doctype html>"));
        assert!(html.contains("/static/styles.css"));
        assert!(html.contains("/static/app.js"));
    }

    #[test]
    fn ui_shell_contains_trading_controls() {
        let html = index_html();
        for id in ["buy-btn", "sell-btn", "next-btn", "restart-btn", "price-chart", "progress-bar"] {
            assert!(html.contains(id), "missing element {id}");
        }
    }

    #[test]
    fn app_script_targets_session_endpoints() {
        let js = app_js();
        assert!(js.contains("/api/session"));
        assert!(js.contains("finished"));
        assert!(js.contains("rejected"));
    }

    #[test]
    fn chart_labels_steps_from_one() {
        let js = app_js();
        assert!(js.contains("point.step + 1"));
        assert!(js.contains("labelStride"));
    }
}
