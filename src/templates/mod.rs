use crate::models::{FileCategory, FileDoc, FileList, TotalSpace, UsageSummary, User};

/// Render the sign-in page. The state token pairs the form with its cookie.
pub fn render_sign_in(state: &str, error: Option<&str>) -> String {
    let error_line = match error {
        Some(message) => format!(r#"<p class="form-error">{}</p>"#, escape_html(message)),
        None => String::new(),
    };

    layout(
        "Sign in - Cubby",
        &format!(
            r#"
            <div class="auth-container">
                <h1>Cubby</h1>
                <p>Your files, one dashboard.</p>
                <form class="auth-form" method="post" action="/sign-in">
                    <input type="hidden" name="state" value="{}">
                    <label for="email">Email</label>
                    <input id="email" name="email" type="email" required autocomplete="email">
                    <label for="password">Password</label>
                    <input id="password" name="password" type="password" required autocomplete="current-password">
                    {}
                    <button type="submit" class="btn btn-primary">Sign in</button>
                </form>
            </div>
            "#,
            escape_html(state),
            error_line
        ),
    )
}

/// Wrap page content in the signed-in chrome: sidebar, mobile nav, header.
/// The resolved account and user identifiers ride on the chrome elements so
/// client-side behavior stays scoped to the right account.
pub fn render_app_shell(user: &User, title: &str, content: &str) -> String {
    let nav_links = sidebar_links();
    let display_name = escape_html(user.display_name());
    let email = escape_html(&user.email);
    let account_id = escape_html(&user.account_id);
    let user_id = escape_html(&user.id);

    layout(
        title,
        &format!(
            r#"
            <div class="app" data-account-id="{account_id}" data-user-id="{user_id}">
                <aside class="sidebar">
                    <div class="brand"><a href="/dashboard">Cubby</a></div>
                    <nav>{nav_links}</nav>
                    <div class="sidebar-user">
                        <span class="user-name">{display_name}</span>
                        <span class="user-email">{email}</span>
                    </div>
                </aside>
                <section class="content-column">
                    <nav class="mobile-nav" data-account-id="{account_id}" data-user-id="{user_id}">
                        <a href="/dashboard" class="brand">Cubby</a>
                        {nav_links}
                    </nav>
                    <header class="app-header" data-account-id="{account_id}" data-user-id="{user_id}">
                        <span class="header-user">{display_name}</span>
                        <a href="/auth/logout" class="btn btn-secondary">Logout</a>
                    </header>
                    <div class="main-content">{content}</div>
                </section>
            </div>
            "#,
        ),
    )
}

fn sidebar_links() -> String {
    let mut links = String::from(r#"<a href="/dashboard">Dashboard</a>"#);
    for category in FileCategory::ALL {
        links.push_str(&format!(
            r#"<a href="/files?type={}">{}</a>"#,
            category,
            category.title()
        ));
    }
    links
}

/// Dashboard content: usage chart, category summary grid, recent files.
pub fn render_dashboard(total: &TotalSpace, summary: &[UsageSummary], recent: &[FileDoc]) -> String {
    let cards: Vec<String> = summary.iter().map(render_summary_card).collect();

    format!(
        r#"
        <div class="dashboard-container">
            <section>
                {}
                <ul class="summary-grid">{}</ul>
            </section>
            <section class="recent-files-section">
                <h4>Recent Files</h4>
                {}
            </section>
        </div>
        "#,
        render_usage_chart(total),
        cards.join("\n"),
        render_recent_files(recent)
    )
}

/// Used-vs-quota ring. Pure presentation; the only arithmetic is the
/// percentage.
fn render_usage_chart(total: &TotalSpace) -> String {
    let percent = total.percent_used();
    format!(
        r#"
        <div class="usage-chart">
            <div class="chart-ring" style="background: conic-gradient(var(--accent) {}%, var(--bg-tertiary) 0);">
                <span class="chart-percent">{}%</span>
            </div>
            <div class="chart-caption">
                <h4>Available Storage</h4>
                <p>{} / {} used</p>
            </div>
        </div>
        "#,
        percent,
        percent,
        convert_file_size(total.used),
        convert_file_size(total.all)
    )
}

fn render_summary_card(summary: &UsageSummary) -> String {
    let latest = summary
        .latest_date
        .as_deref()
        .map(format_date_time)
        .unwrap_or_else(|| "No uploads yet".to_string());

    format!(
        r#"
        <li>
            <a href="{}" class="summary-card">
                <div class="summary-card-top">
                    <img src="{}" alt="" class="summary-icon">
                    <h4 class="summary-size">{}</h4>
                </div>
                <h5 class="summary-title">{}</h5>
                <hr class="summary-rule">
                <div class="summary-date">{}</div>
            </a>
        </li>
        "#,
        summary.url,
        summary.icon,
        convert_file_size(summary.size),
        escape_html(summary.title),
        escape_html(&latest)
    )
}

fn render_recent_files(recent: &[FileDoc]) -> String {
    if recent.is_empty() {
        return r#"<p class="empty-list">No recent files uploaded.</p>"#.to_string();
    }

    let rows: Vec<String> = recent.iter().map(render_file_row).collect();
    format!(r#"<ul class="file-list">{}</ul>"#, rows.join("\n"))
}

/// A single file row, shared by the dashboard and the filtered listing.
/// The menu button swaps the dropdown partial into the row's menu slot.
pub fn render_file_row(file: &FileDoc) -> String {
    let id = escape_html(&file.id);
    let name = escape_html(&file.name);
    let created = format_date_time(&file.created_at);

    [
        "<li class=\"file-row\" id=\"file-",
        &id,
        "\">",
        "<div class=\"file-row-main\">",
        &render_thumbnail(file),
        "<span class=\"file-name\">",
        &name,
        "</span>",
        "</div>",
        "<div class=\"file-row-side\">",
        "<span class=\"file-size\">",
        &convert_file_size(file.size),
        "</span>",
        "<span class=\"file-date\">",
        &escape_html(&created),
        "</span>",
        "<button class=\"btn btn-ghost\" hx-get=\"/files/",
        &id,
        "/menu\" hx-target=\"#menu-",
        &id,
        "\" hx-swap=\"innerHTML\">⋯</button>",
        "<div class=\"file-menu-slot\" id=\"menu-",
        &id,
        "\"></div>",
        "</div></li>",
    ]
    .concat()
}

fn render_thumbnail(file: &FileDoc) -> String {
    let src = match (&file.category, &file.url) {
        (FileCategory::Image, Some(url)) => escape_html(url),
        _ => file.category.icon().to_string(),
    };
    format!(
        r#"<img src="{}" alt="{}" class="file-thumbnail">"#,
        src,
        escape_html(&file.extension)
    )
}

/// Dropdown partial for a file row: rename, share, delete.
pub fn render_file_menu(file: &FileDoc) -> String {
    let id = escape_html(&file.id);
    let name = escape_html(&file.name);

    [
        "<div class=\"file-menu\">",
        "<form hx-post=\"/files/",
        &id,
        "/rename\" hx-target=\"#file-",
        &id,
        "\" hx-swap=\"outerHTML\">",
        "<input name=\"name\" value=\"",
        &name,
        "\" required>",
        "<button type=\"submit\" class=\"btn btn-sm\">Rename</button>",
        "</form>",
        "<form hx-post=\"/files/",
        &id,
        "/share\" hx-target=\"#file-",
        &id,
        "\" hx-swap=\"outerHTML\">",
        "<input name=\"email\" type=\"email\" placeholder=\"Share with email\" required>",
        "<button type=\"submit\" class=\"btn btn-sm\">Share</button>",
        "</form>",
        "<button class=\"btn btn-sm btn-danger\" hx-post=\"/files/",
        &id,
        "/delete\" hx-target=\"#file-",
        &id,
        "\" hx-swap=\"outerHTML\" hx-confirm=\"Delete this file?\">Delete</button>",
        "<button class=\"btn btn-sm btn-ghost\" hx-get=\"/files/menu/close\" hx-target=\"#menu-",
        &id,
        "\" hx-swap=\"innerHTML\">Close</button>",
        "</div>",
    ]
    .concat()
}

/// Filtered listing content for `/files`.
pub fn render_files_page(category: Option<FileCategory>, list: &FileList) -> String {
    let heading = category.map(|c| c.title()).unwrap_or("All Files");

    let body = if list.documents.is_empty() {
        r#"<p class="empty-list">No files uploaded</p>"#.to_string()
    } else {
        let rows: Vec<String> = list.documents.iter().map(|f| render_file_row(f)).collect();
        format!(r#"<ul class="file-list">{}</ul>"#, rows.join("\n"))
    };

    format!(
        r#"
        <div class="files-container">
            <header class="files-header">
                <h1>{}</h1>
                <p class="files-total">{} file(s)</p>
            </header>
            {}
        </div>
        "#,
        escape_html(heading),
        list.total,
        body
    )
}

/// Wrap content in the base document.
fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <style>{}</style>
</head>
<body>
    {}
</body>
</html>"#,
        escape_html(title),
        STYLE,
        content
    )
}

const STYLE: &str = r#"
:root {
    --bg-primary: #f7f8fc;
    --bg-secondary: #ffffff;
    --bg-tertiary: #eef1f8;
    --text-primary: #1f2333;
    --text-secondary: #6b7280;
    --accent: #4c6fff;
    --error: #d94a4a;
    --border: #e3e7f0;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    line-height: 1.5;
    min-height: 100vh;
}

.btn {
    display: inline-flex;
    align-items: center;
    gap: 0.5rem;
    padding: 0.5rem 1rem;
    border-radius: 6px;
    border: 1px solid transparent;
    text-decoration: none;
    font-weight: 500;
    cursor: pointer;
}

.btn-primary { background: var(--accent); color: #fff; }
.btn-secondary { background: var(--bg-tertiary); color: var(--text-primary); border-color: var(--border); }
.btn-ghost { background: transparent; color: var(--text-secondary); }
.btn-danger { background: var(--error); color: #fff; }
.btn-sm { padding: 0.25rem 0.6rem; font-size: 0.8rem; }

.auth-container {
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    min-height: 100vh;
    gap: 0.75rem;
    text-align: center;
}

.auth-form {
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    width: 320px;
    text-align: left;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 10px;
    padding: 1.5rem;
}

.auth-form input {
    padding: 0.5rem;
    border: 1px solid var(--border);
    border-radius: 6px;
}

.form-error { color: var(--error); font-size: 0.85rem; }

.app { display: flex; min-height: 100vh; }

.sidebar {
    width: 220px;
    flex-shrink: 0;
    display: flex;
    flex-direction: column;
    gap: 1.5rem;
    padding: 1.5rem 1rem;
    background: var(--bg-secondary);
    border-right: 1px solid var(--border);
}

.sidebar .brand a, .mobile-nav .brand {
    font-size: 1.25rem;
    font-weight: 700;
    color: var(--accent);
    text-decoration: none;
}

.sidebar nav, .mobile-nav { display: flex; flex-direction: column; gap: 0.25rem; }

.sidebar nav a, .mobile-nav a {
    padding: 0.5rem 0.75rem;
    border-radius: 6px;
    color: var(--text-primary);
    text-decoration: none;
}

.sidebar nav a:hover { background: var(--bg-tertiary); }

.sidebar-user {
    margin-top: auto;
    display: flex;
    flex-direction: column;
    font-size: 0.85rem;
}

.user-email { color: var(--text-secondary); }

.content-column { flex: 1; display: flex; flex-direction: column; }

.mobile-nav { display: none; }

.app-header {
    display: flex;
    justify-content: flex-end;
    align-items: center;
    gap: 1rem;
    padding: 0.75rem 2rem;
    background: var(--bg-secondary);
    border-bottom: 1px solid var(--border);
}

.main-content { padding: 2rem; max-width: 1100px; width: 100%; margin: 0 auto; }

.usage-chart {
    display: flex;
    align-items: center;
    gap: 1.5rem;
    padding: 1.5rem;
    background: var(--accent);
    color: #fff;
    border-radius: 12px;
    margin-bottom: 1.5rem;
}

.chart-ring {
    width: 110px;
    height: 110px;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    flex-shrink: 0;
}

.chart-percent {
    background: var(--bg-secondary);
    color: var(--text-primary);
    width: 80px;
    height: 80px;
    border-radius: 50%;
    display: flex;
    align-items: center;
    justify-content: center;
    font-weight: 700;
}

.summary-grid {
    list-style: none;
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
    gap: 1rem;
}

.summary-card {
    display: block;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 1.25rem;
    text-decoration: none;
    color: var(--text-primary);
}

.summary-card:hover { border-color: var(--accent); }

.summary-card-top { display: flex; justify-content: space-between; align-items: center; }
.summary-icon { width: 44px; height: 44px; }
.summary-title { margin-top: 0.75rem; }
.summary-rule { border: none; border-top: 1px solid var(--border); margin: 0.75rem 0; }
.summary-date { color: var(--text-secondary); font-size: 0.8rem; text-align: center; }

.recent-files-section { margin-top: 2rem; }
.recent-files-section h4 { font-size: 1.15rem; margin-bottom: 1rem; }

.file-list { list-style: none; display: flex; flex-direction: column; gap: 0.5rem; }

.file-row {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 1rem;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 10px;
    padding: 0.75rem 1rem;
}

.file-row-main { display: flex; align-items: center; gap: 0.75rem; min-width: 0; }
.file-name { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.file-thumbnail { width: 36px; height: 36px; border-radius: 8px; object-fit: cover; }
.file-row-side { display: flex; align-items: center; gap: 0.75rem; position: relative; }
.file-size, .file-date { color: var(--text-secondary); font-size: 0.85rem; }

.file-menu-slot { position: relative; }

.file-menu {
    position: absolute;
    right: 0;
    top: 1.5rem;
    z-index: 10;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 0.75rem;
    box-shadow: 0 8px 24px rgba(31, 35, 51, 0.12);
}

.file-menu form { display: flex; gap: 0.5rem; }
.file-menu input { padding: 0.25rem 0.5rem; border: 1px solid var(--border); border-radius: 6px; }

.files-header { display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 1rem; }
.files-total { color: var(--text-secondary); }

.empty-list { color: var(--text-secondary); padding: 2rem; text-align: center; }

@media (max-width: 720px) {
    .sidebar { display: none; }
    .mobile-nav { display: flex; padding: 0.75rem 1rem; background: var(--bg-secondary); border-bottom: 1px solid var(--border); }
}
"#;

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Format a raw byte count in the largest fitting unit. Counts below 1024
/// render as whole bytes; everything else gets one decimal place, capped at
/// GB.
pub fn convert_file_size(size: u64) -> String {
    if size < 1024 {
        return format!("{} Bytes", size);
    }

    let mut value = size as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format an ISO 8601 timestamp as "9:30am, 1 Jul". Falls back to the raw
/// string when the shape is unexpected.
pub fn format_date_time(ts: &str) -> String {
    let Some((date, time)) = ts.split_once('T') else {
        return ts.to_string();
    };

    let mut date_parts = date.split('-');
    let _year = date_parts.next();
    let month = date_parts.next().and_then(|m| m.parse::<usize>().ok());
    let day = date_parts.next().and_then(|d| d.parse::<u32>().ok());

    let mut time_parts = time.split(':');
    let hour = time_parts.next().and_then(|h| h.parse::<u32>().ok());
    let minute = time_parts.next().and_then(|m| m.parse::<u32>().ok());

    match (month, day, hour, minute) {
        (Some(month), Some(day), Some(hour), Some(minute))
            if (1..=12).contains(&month) && hour < 24 && minute < 60 =>
        {
            let meridiem = if hour < 12 { "am" } else { "pm" };
            let hour12 = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!(
                "{}:{:02}{}, {} {}",
                hour12,
                minute,
                meridiem,
                day,
                MONTHS[month - 1]
            )
        }
        _ => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{usage_summary, CategoryUsage};
    use std::collections::BTreeMap;

    #[test]
    fn sizes_below_1024_render_as_bytes() {
        assert_eq!(convert_file_size(0), "0 Bytes");
        assert_eq!(convert_file_size(1), "1 Bytes");
        assert_eq!(convert_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn sizes_pick_the_largest_fitting_unit() {
        assert_eq!(convert_file_size(1024), "1.0 KB");
        assert_eq!(convert_file_size(1536), "1.5 KB");
        assert_eq!(convert_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(convert_file_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
        assert_eq!(convert_file_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn sizes_never_exceed_gb() {
        // 5 TB still renders in GB.
        assert_eq!(convert_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120.0 GB");
    }

    #[test]
    fn date_time_formats_morning_and_afternoon() {
        assert_eq!(
            format_date_time("2026-07-01T09:30:00.000Z"),
            "9:30am, 1 Jul"
        );
        assert_eq!(
            format_date_time("2026-12-24T13:05:00.000Z"),
            "1:05pm, 24 Dec"
        );
        assert_eq!(format_date_time("2026-01-02T00:00:00.000Z"), "12:00am, 2 Jan");
    }

    #[test]
    fn date_time_falls_back_on_unexpected_shape() {
        assert_eq!(format_date_time("not a date"), "not a date");
        assert_eq!(format_date_time("2026-99-01T09:30:00Z"), "2026-99-01T09:30:00Z");
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'>&"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt;&amp;"
        );
    }

    #[test]
    fn empty_recent_files_renders_only_the_empty_state() {
        let html = render_recent_files(&[]);
        assert!(html.contains("No recent files uploaded."));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn dashboard_renders_one_card_per_summary_entry() {
        let mut by_category = BTreeMap::new();
        by_category.insert(
            crate::models::FileCategory::Document,
            CategoryUsage {
                size: 2048,
                latest_date: Some("2026-07-01T09:30:00.000Z".to_string()),
            },
        );
        by_category.insert(
            crate::models::FileCategory::Image,
            CategoryUsage {
                size: 4096,
                latest_date: None,
            },
        );
        let total = TotalSpace {
            used: 6144,
            all: 1024 * 1024,
            by_category,
        };
        let summary = usage_summary(&total);

        let html = render_dashboard(&total, &summary, &[]);
        assert_eq!(html.matches("class=\"summary-card\"").count(), summary.len());
        assert!(html.contains(r#"href="/files?type=document""#));
        assert!(html.contains(r#"href="/files?type=image""#));
    }

    fn sample_file(name: &str) -> FileDoc {
        FileDoc {
            id: "f1".to_string(),
            name: name.to_string(),
            category: FileCategory::Document,
            extension: "pdf".to_string(),
            size: 2048,
            created_at: "2026-07-01T09:30:00.000Z".to_string(),
            url: None,
        }
    }

    #[test]
    fn file_row_escapes_the_name() {
        let html = render_file_row(&sample_file("<script>.pdf"));
        assert!(html.contains("&lt;script&gt;.pdf"));
        assert!(!html.contains("<script>.pdf"));
    }

    #[test]
    fn file_menu_offers_rename_share_delete() {
        let html = render_file_menu(&sample_file("notes.pdf"));
        assert!(html.contains("/files/f1/rename"));
        assert!(html.contains("/files/f1/share"));
        assert!(html.contains("/files/f1/delete"));
    }

    #[test]
    fn files_page_empty_state() {
        let list = FileList::default();
        let html = render_files_page(Some(FileCategory::Image), &list);
        assert!(html.contains("Images"));
        assert!(html.contains("No files uploaded"));
    }
}
