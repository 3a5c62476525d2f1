//! Server-side HTML rendering
//!
//! Everything here is a pure function of its inputs. Dynamic text goes
//! through `escape_html` before it reaches markup.

pub mod components;
pub mod image;
pub mod pages;

pub use components::NavBar;
pub use image::{ImageResolver, ImageSize, ImageUrl, NO_IMAGE};

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

const STYLESHEET: &str = r#"
body{margin:0;background:#141414;color:#fff;font-family:Helvetica,Arial,sans-serif}
a{color:inherit;text-decoration:none}
.nav{position:fixed;top:0;width:100%;z-index:10;display:flex;align-items:center;gap:2rem;padding:1rem 3rem;box-sizing:border-box;background:linear-gradient(to bottom,rgba(0,0,0,.7),transparent);transition:background .3s}
.nav--solid{background:#000}
.nav__logo{color:#e50914;font-weight:700;font-size:1.6rem}
.nav__links{display:flex;gap:1.2rem;list-style:none;margin:0;padding:0}
.nav__link{color:#ccc}.nav__link--active{color:#fff;font-weight:600}
.nav__search{margin-left:auto}
.banner{min-height:70vh;background-size:cover;background-position:center;display:flex;align-items:flex-end;padding:6rem 3rem 8rem}
.banner__content{max-width:40rem;text-shadow:0 1px 4px #000}
.banner__title{font-size:3rem;margin:0 0 1rem}
.button{display:inline-block;padding:.6rem 1.8rem;margin-right:.6rem;border-radius:4px;font-weight:600}
.button--play{background:#fff;color:#000}.button--info{background:rgba(109,109,110,.7)}
.rows{margin-top:-6rem;padding-bottom:4rem}
.row{padding:0 3rem;margin-bottom:2rem}
.row__posters{display:flex;gap:.5rem;overflow-x:scroll;overflow-y:hidden;padding:1rem 0}
.card{position:relative;flex:0 0 auto;width:180px;transition:transform .3s}
.card:hover{transform:scale(1.08);z-index:2}
.card__image{width:100%;border-radius:4px;display:block}
.card__placeholder{height:270px;display:flex;align-items:center;justify-content:center;background:#333;border-radius:4px;text-align:center}
.card__details{display:none;position:absolute;inset:0;background:rgba(0,0,0,.9);padding:.6rem;font-size:.8rem}
.card:hover .card__details{display:block}
.rating{color:#46d369;font-weight:600}
.page{padding:6rem 3rem}
.spinner{width:4rem;height:4rem;margin:40vh auto;border:4px solid #e50914;border-top-color:transparent;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.form{max-width:22rem;margin:8rem auto;padding:3rem;background:rgba(0,0,0,.75);border-radius:4px}
.form input{display:block;width:100%;margin:.6rem 0;padding:.8rem;box-sizing:border-box}
.form__error{color:#e87c03}
footer{padding:2.5rem;text-align:center;color:#777;font-size:.8rem}
"#;

/// Toggles `.nav--solid` past the threshold carried on the nav element
const NAV_SCRIPT: &str = r#"
(function(){var n=document.querySelector('.nav');if(!n)return;var t=parseInt(n.dataset.scrollThreshold||'100',10);
function u(){n.classList.toggle('nav--solid',window.scrollY>t);}window.addEventListener('scroll',u);u();})();
"#;

/// Wraps a page body in the document shell
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Streamflix</title>
<style>{STYLESHEET}</style>
</head>
<body>
{body}
<footer><p>Data provided by <a href="https://www.themoviedb.org/">TMDB</a>. This product uses the TMDB API but is not endorsed or certified by TMDB.</p></footer>
<script>{NAV_SCRIPT}</script>
</body>
</html>"#,
        title = escape_html(title),
    )
}
