//! Page scripts used by the shadow piercer.
//!
//! Each constant is a function body in the `arguments[i]` / `return`
//! convention. They are deliberately primitive: one shadow boundary per
//! call, with traversal and fallback policy kept on the Rust side.
//!
//! A [`Session`](crate::driver::Session) that does not run JavaScript can
//! recognise these constants by value and answer them natively.

/// `(host) -> "open" | "closed" | "none"`.
///
/// A custom element (tag containing `-`) without an accessible root is
/// reported as `closed`.
pub const SHADOW_MODE: &str = r#"
    var host = arguments[0];
    if (!host) { return 'none'; }
    if (host.shadowRoot) { return 'open'; }
    return host.tagName.indexOf('-') >= 0 ? 'closed' : 'none';
"#;

/// `(host, selector) -> element | null`.
///
/// Queries the host's open shadow root, falling back to an id match when
/// `selector` is `#id` and the selector engine rejects it.
pub const QUERY_SHADOW: &str = r#"
    var host = arguments[0];
    var selector = arguments[1];
    var root = host ? host.shadowRoot : null;
    if (!root) { return null; }
    try {
        var hit = root.querySelector(selector);
        if (hit) { return hit; }
    } catch (e) { }
    if (selector.charAt(0) === '#') {
        var id = selector.substring(1);
        var all = root.querySelectorAll('*');
        for (var i = 0; i < all.length; i++) {
            if (all[i].id === id) { return all[i]; }
        }
    }
    return null;
"#;

/// `(host) -> element[]`: shadow hosts inside the host's open root.
///
/// Includes custom elements with no accessible root so the caller can
/// classify them.
pub const NESTED_HOSTS: &str = r#"
    var host = arguments[0];
    var root = host ? host.shadowRoot : null;
    if (!root) { return []; }
    return Array.from(root.querySelectorAll('*')).filter(function (n) {
        return n.shadowRoot || n.tagName.indexOf('-') >= 0;
    });
"#;

/// `() -> element[]`: light-DOM shadow hosts and custom elements.
pub const LIGHT_DOM_HOSTS: &str = r#"
    return Array.from(document.querySelectorAll('*')).filter(function (n) {
        return n.shadowRoot || n.tagName.indexOf('-') >= 0;
    });
"#;

/// `() -> element[]`: light-DOM elements with an open shadow root.
pub const OPEN_SHADOW_HOSTS: &str = r#"
    return Array.from(document.querySelectorAll('*')).filter(function (n) {
        return !!n.shadowRoot;
    });
"#;

/// `(id) -> element | null`: document-wide id scan.
pub const SCAN_BY_ID: &str = r#"
    var id = arguments[0];
    var all = document.querySelectorAll('*');
    for (var i = 0; i < all.length; i++) {
        if (all[i].id === id) { return all[i]; }
    }
    return null;
"#;

/// `(element, value, inputsOnly) -> bool`.
///
/// Writes `value` and dispatches `input` and `change`.
pub const SET_VALUE: &str = r#"
    var el = arguments[0];
    if (!el || !('value' in el)) { return false; }
    if (arguments[2] && el.tagName !== 'INPUT') { return false; }
    el.value = arguments[1];
    el.dispatchEvent(new Event('input', { bubbles: true }));
    el.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
"#;

/// `(element) -> bool`: checks a radio or checkbox.
pub const SET_CHECKED: &str = r#"
    var el = arguments[0];
    if (!el || !('checked' in el)) { return false; }
    el.checked = true;
    el.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
"#;

/// `(select, text) -> bool`.
///
/// Selects the first option whose text equals `text`, else the first whose
/// value does. Returns `false` when nothing matches.
pub const SELECT_OPTION: &str = r#"
    var el = arguments[0];
    var wanted = arguments[1];
    if (!el || !el.options) { return false; }
    var index = -1;
    for (var i = 0; i < el.options.length; i++) {
        if (el.options[i].text === wanted) { index = i; break; }
    }
    if (index < 0) {
        for (var j = 0; j < el.options.length; j++) {
            if (el.options[j].value === wanted) { index = j; break; }
        }
    }
    if (index < 0) { return false; }
    el.selectedIndex = index;
    el.dispatchEvent(new Event('change', { bubbles: true }));
    return true;
"#;

/// `(hostTags) -> { totalElements, shadowHosts, inputs, openHostTags }`.
pub const PAGE_STRUCTURE: &str = r#"
    var all = Array.from(document.querySelectorAll('*'));
    var tags = arguments[0];
    return {
        totalElements: all.length,
        shadowHosts: all.filter(function (n) {
            return tags.indexOf(n.tagName.toLowerCase()) >= 0;
        }).length,
        inputs: document.querySelectorAll('input').length,
        openHostTags: all.filter(function (n) { return !!n.shadowRoot; })
            .map(function (n) { return n.tagName.toLowerCase(); })
    };
"#;
