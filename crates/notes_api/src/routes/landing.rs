use axum::response::Html;

const LANDING_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Notes</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 3rem auto; color: #222; }
    code { background: #f3f3f3; padding: 0.1rem 0.3rem; border-radius: 3px; }
    li { margin: 0.3rem 0; }
  </style>
</head>
<body>
  <h1>Notes</h1>
  <p>The notes API is running. Resources:</p>
  <ul>
    <li><a href="/api/tasks"><code>/api/tasks</code></a> (filters: status, priority, package_id)</li>
    <li><code>PUT /api/tasks/{id}/status</code> with <code>{"status": "..."}</code></li>
    <li><a href="/api/notes"><code>/api/notes</code></a> (filter: package_id)</li>
    <li><code>POST /api/notes/{id}/links</code>, <code>DELETE /api/notes/{id}/links/{task_id}</code></li>
    <li><a href="/api/packages"><code>/api/packages</code></a> (filters: status, parent_id)</li>
    <li><code>/api/search?q=...</code></li>
    <li><a href="/api/stats"><code>/api/stats</code></a></li>
  </ul>
</body>
</html>
"#;

pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
