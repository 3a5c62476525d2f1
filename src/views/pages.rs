//! Full pages

use crate::{
    models::CatalogList,
    services::{
        page::{PageState, GENERIC_FAILURE_MESSAGE},
        TitlePage,
    },
};

use super::{
    components::{detail_hero, featured_banner, row},
    document, escape_html, ImageResolver, NavBar,
};

pub fn loading_page() -> String {
    document(
        "Loading",
        r#"<main class="loading" aria-busy="true"><div class="spinner" role="status" aria-label="Loading"></div></main>"#,
    )
}

/// Generic failure page. Never shows error detail.
pub fn error_page(retry_href: Option<&str>) -> String {
    let retry = retry_href
        .map(|href| {
            format!(
                r#"<a class="button button--play" href="{}">Try Again</a>"#,
                escape_html(href)
            )
        })
        .unwrap_or_default();

    document(
        "Error",
        &format!(
            r#"<main class="page page--error"><h1>{GENERIC_FAILURE_MESSAGE}</h1>{retry}</main>"#
        ),
    )
}

pub fn not_found_page() -> String {
    document(
        "Page Not Found",
        r#"<main class="page page--not-found"><h1>Lost your way?</h1><p>Sorry, we can't find that page.</p><a class="button button--play" href="/">Streamflix Home</a></main>"#,
    )
}

/// The browse page, rendered from the page state
pub fn browse_page(state: &PageState, nav: &NavBar, images: &ImageResolver) -> String {
    match state {
        PageState::Loading => loading_page(),
        PageState::Failed(_) => error_page(Some("/browse")),
        PageState::Ready { lists, featured } => {
            let banner = featured
                .as_ref()
                .map(|f| featured_banner(f, images))
                .unwrap_or_default();
            let rows: String = lists.iter().map(|list| row(list, images)).collect();

            document(
                "Home",
                &format!(
                    r#"{nav}<main>{banner}<div class="rows">{rows}</div></main>"#,
                    nav = nav.render("/browse"),
                ),
            )
        }
    }
}

pub fn category_page(list: &CatalogList, nav: &NavBar, images: &ImageResolver) -> String {
    let content = if list.is_empty() {
        r#"<p class="empty">Nothing to show here yet.</p>"#.to_string()
    } else {
        row(list, images)
    };

    document(
        &list.label,
        &format!(
            r#"{nav}<main class="page"><h1>{label}</h1>{content}</main>"#,
            nav = nav.render(&format!("/browse/{}", list.slug)),
            label = escape_html(&list.label),
        ),
    )
}

pub fn watch_page(title: &TitlePage, nav: &NavBar, images: &ImageResolver) -> String {
    document(
        &title.detail.item.title,
        &format!(
            r#"{nav}<main>{hero}<div class="rows">{similar}</div></main>"#,
            nav = nav.render(""),
            hero = detail_hero(&title.detail, images),
            similar = row(&title.similar, images),
        ),
    )
}

pub fn search_page(
    query: &str,
    results: Option<&CatalogList>,
    nav: &NavBar,
    images: &ImageResolver,
) -> String {
    let content = match results {
        None => r#"<p class="empty">Search for movies and TV shows.</p>"#.to_string(),
        Some(list) if list.is_empty() => format!(
            r#"<p class="empty">Your search for "{}" did not have any matches.</p>"#,
            escape_html(query.trim())
        ),
        Some(list) => row(list, images),
    };

    document(
        "Search",
        &format!(
            r#"{nav}<main class="page">{content}</main>"#,
            nav = nav.render("/search"),
        ),
    )
}

pub fn landing_page() -> String {
    document(
        "Watch TV Shows Online, Watch Movies Online",
        r#"<main class="page page--landing">
<h1>Unlimited movies, TV shows, and more</h1>
<p>Watch anywhere. Cancel anytime.</p>
<a class="button button--play" href="/signup">Get Started</a>
<a class="button button--info" href="/login">Sign In</a>
</main>"#,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn path(&self) -> &'static str {
        match self {
            AuthMode::Login => "/login",
            AuthMode::Signup => "/signup",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Signup => "Sign Up",
        }
    }
}

/// Login/signup form, optionally with a validation message
pub fn auth_page(mode: AuthMode, message: Option<&str>) -> String {
    let error = message
        .map(|m| format!(r#"<p class="form__error">{}</p>"#, escape_html(m)))
        .unwrap_or_default();
    let switch = match mode {
        AuthMode::Login => r#"<p>New here? <a href="/signup">Sign up now</a>.</p>"#,
        AuthMode::Signup => r#"<p>Already have an account? <a href="/login">Sign in</a>.</p>"#,
    };

    document(
        mode.heading(),
        &format!(
            r#"<main><form class="form" action="{action}" method="post">
<h1>{heading}</h1>
{error}
<input type="email" name="email" placeholder="Email" required>
<input type="password" name="password" placeholder="Password" required>
<button class="button button--play" type="submit">{heading}</button>
{switch}
</form></main>"#,
            action = mode.path(),
            heading = mode.heading(),
        ),
    )
}
