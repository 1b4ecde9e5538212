//! Auth-gated application shell served at `/`.
//!
//! Visitors without a valid login session only ever see the sign-in view. The application
//! content is rendered for authenticated visitors alone.

use axum::{extract::State, response::Html, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::server::{
    controller::util::{
        cookie::{remove_session_cookie, session_token},
        session::get_session_from_cookie,
    },
    error::Error,
    model::{app::AppState, db::UserModel},
    provider::ProviderRegistry,
};

/// Shell routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Renders the sign-in view or, for an authenticated visitor, the application.
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), Error> {
    let current = get_session_from_cookie(&state, &jar).await?;

    match current {
        Some((_, user)) => Ok((jar, Html(render_app(&user)))),
        None => {
            let jar = match session_token(&jar) {
                Some(_) => remove_session_cookie(jar),
                None => jar,
            };

            Ok((jar, Html(render_sign_in(&state.providers))))
        }
    }
}

fn render_sign_in(providers: &ProviderRegistry) -> String {
    let links = providers
        .iter()
        .map(|provider| {
            format!(
                "<li><a href=\"/auth/login/{}\">Sign in with {}</a></li>",
                html_escape::encode_double_quoted_attribute(provider.id()),
                html_escape::encode_text(provider.display_name())
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    render_page(&format!(
        r#"<main>
    <h1>Sign in</h1>
    <ul>
      {}
    </ul>
  </main>"#,
        links
    ))
}

fn render_app(user: &UserModel) -> String {
    let display_name = user.name.as_deref().unwrap_or(&user.username);

    render_page(&format!(
        r#"<header>
    <img src="{}" alt="" width="32" height="32" />
    <span>{}</span>
    <form method="post" action="/api/auth/logout">
      <button type="submit">Sign out</button>
    </form>
  </header>
  <main id="app">
    <h1>Welcome, {}</h1>
  </main>"#,
        html_escape::encode_double_quoted_attribute(&user.profile_picture),
        html_escape::encode_text(&user.username),
        html_escape::encode_text(display_name)
    ))
}

fn render_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Heimdall</title>
</head>
<body>
  {}
</body>
</html>"#,
        body
    )
}
