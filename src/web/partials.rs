use clap::crate_version;
use maud::{html, Markup};
use poem::i18n::Locale;

use crate::prelude::*;

pub use self::importance_chart::ImportanceChart;

mod importance_chart;

pub fn headers() -> Markup {
    html! {
        meta name="viewport" content="width=device-width, initial-scale=1";
        meta charset="UTF-8";
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.3/css/all.min.css" integrity="sha512-iBBXm8fW90+nuLcSKlbmrPcLa0OT92xO1BIsZ+ywDWZCvqsWgccV3gFoRBv0z+8dLJgyAHIhR35VZc2oM/gI1w==" crossorigin="anonymous" referrerpolicy="no-referrer";
        link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="anonymous";
    }
}

pub fn footer(locale: &Locale) -> Result<Markup> {
    let markup = html! {
        footer.footer {
            div.content.has-text-centered {
                p {
                    span.icon-text.is-flex-wrap-nowrap {
                        span.icon { i.fas.fa-home.has-text-info {} }
                        span { "Home Price " (crate_version!()) }
                    }
                }
                p {
                    span.icon-text.is-flex-wrap-nowrap {
                        span.icon { i.fas.fa-heart.has-text-danger {} }
                        span {
                            (locale.text("footer-source")?) ": "
                            a href="https://www.rust-lang.org/" { "Rust" }
                            ", " a href="https://bulma.io/" { "Bulma" }
                            ", " a href="https://leafletjs.com/" { "Leaflet" }
                        }
                    }
                }
            }
        }
    };
    Ok(markup)
}
