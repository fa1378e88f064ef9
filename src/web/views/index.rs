//! The estimate form.
//!
//! Every submit re-renders the whole page from the query string, nothing is kept in between.

use maud::{html, Markup, DOCTYPE};
use poem::error::BadRequest;
use poem::i18n::Locale;
use poem::web::{Data, Html, Query};
use poem::handler;

use self::form::EstimateForm;
use crate::features::{PropertyType, UserInput};
use crate::importance::{top_importances, DEFAULT_TOP};
use crate::model::ModelBundle;
use crate::prediction::estimate;
use crate::prelude::*;
use crate::web::partials::{footer, headers, ImportanceChart};

mod form;

#[handler]
#[instrument(skip_all, level = "info")]
pub async fn get(
    Query(form): Query<EstimateForm>,
    locale: Locale,
    Data(bundle): Data<&Arc<ModelBundle>>,
) -> poem::Result<Html<String>> {
    let input = form.user_input().map_err(BadRequest)?;
    let markup = render(&form, &input, bundle, &locale)?;
    Ok(Html(markup.into_string()))
}

fn render(
    form: &EstimateForm,
    input: &UserInput,
    bundle: &ModelBundle,
    locale: &Locale,
) -> Result<Markup> {
    let prediction = if form.predict {
        let prediction = estimate(bundle, input)?;
        info!(prediction.price, "estimated");
        Some(prediction)
    } else {
        None
    };
    let importances = if form.importance {
        top_importances(bundle, DEFAULT_TOP)
    } else {
        Vec::new()
    };

    let markup = html! {
        (DOCTYPE)
        html lang=(locale.text("html-lang")?) {
            head {
                (headers())
                title { (locale.text("page-title")?) }
            }
            body {
                section.section {
                    div.container {
                        h1.title { (locale.text("page-heading")?) }
                        p.subtitle."is-6" { (locale.text("page-intro")?) }

                        form action="/" method="GET" {
                            div.columns {
                                div.column {
                                    div.field {
                                        label.label for="living_area" { (locale.text("living-area")?) }
                                        div.control {
                                            input.input id="living_area"
                                                type="number"
                                                name="living_area"
                                                min="0"
                                                step="any"
                                                value=(input.living_area_m2)
                                                required;
                                        }
                                    }
                                    div.field {
                                        label.label for="land_area" { (locale.text("land-area")?) }
                                        div.control {
                                            input.input id="land_area"
                                                type="number"
                                                name="land_area"
                                                min="0"
                                                step="any"
                                                value=(input.land_area_m2)
                                                required;
                                        }
                                    }
                                    div.field {
                                        label.label for="rooms" { (locale.text("rooms")?) }
                                        div.control {
                                            input.input id="rooms"
                                                type="number"
                                                name="rooms"
                                                min=(UserInput::MIN_ROOMS)
                                                max=(UserInput::MAX_ROOMS)
                                                step="1"
                                                value=(input.rooms)
                                                required;
                                        }
                                    }
                                }

                                div.column {
                                    div.field {
                                        label.label for="property_type" { (locale.text("property-type")?) }
                                        div.control {
                                            div.select {
                                                select id="property_type" name="property_type" {
                                                    @for property_type in PropertyType::ALL {
                                                        option
                                                            value=(property_type.as_str())
                                                            selected[property_type == input.property_type] {
                                                                (locale.text(property_type.label_id())?)
                                                            }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }

                            h2.subtitle { (locale.text("map-heading")?) }
                            p.help { (locale.text("map-caption")?) }
                            div id="map"
                                data-popup=(locale.text("map-marker-popup")?)
                                style="height: 400px; max-width: 700px" {}
                            input id="latitude" type="hidden" name="latitude" value=(input.location.latitude);
                            input id="longitude" type="hidden" name="longitude" value=(input.location.longitude);
                            p."mt-2" {
                                strong { (locale.text("chosen-location")?) }
                                " Lat "
                                span id="chosen-latitude" { (format!("{:.5}", input.location.latitude)) }
                                ", Long "
                                span id="chosen-longitude" { (format!("{:.5}", input.location.longitude)) }
                            }

                            div.field."mt-4" {
                                div.control {
                                    button.button.is-link type="submit" name="predict" value="true" {
                                        span.icon { i.fas.fa-calculator {} }
                                        span { (locale.text("predict-button")?) }
                                    }
                                }
                            }

                            @if let Some(prediction) = prediction {
                                div.box id="prediction" {
                                    p.title."is-5" { (locale.text("estimated-price")?) }
                                    p."is-size-4" { strong { (prediction.formatted()) } }
                                    p { em { (locale.text("estimate-disclaimer")?) } }
                                }
                            }

                            hr;
                            h2.subtitle { (locale.text("importance-heading")?) }
                            div.field {
                                label.checkbox {
                                    input id="importance"
                                        type="checkbox"
                                        name="importance"
                                        value="true"
                                        checked[form.importance];
                                    " " (locale.text("importance-checkbox")?)
                                }
                            }
                        }

                        @if form.importance {
                            (ImportanceChart {
                                title: locale.text("importance-chart-title")?,
                                feature_label: locale.text("feature-axis")?,
                                importance_label: locale.text("importance-axis")?,
                                importances: &importances,
                            })
                        }
                    }
                }

                (footer(locale)?)

                script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin="anonymous" {}
                script src="/static/index.js" {}
            }
        }
    };
    Ok(markup)
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use crate::prelude::*;
    use crate::web::test::{create_test_client, read_text};

    #[tokio::test]
    async fn get_empty_form_ok() -> Result {
        let client = create_test_client()?;
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        let html = read_text(response).await?;
        assert!(html.contains("Bostadstyp"));
        assert!(html.contains("Villa / Hus"));
        assert!(html.contains(r#"id="chosen-latitude">59.33000<"#));
        assert!(html.contains(r#"id="chosen-longitude">18.06000<"#));
        assert!(!html.contains(r#"id="prediction""#));
        assert!(!html.contains(r#"id="importance-chart""#));
        Ok(())
    }

    #[tokio::test]
    async fn get_prediction_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .get("/")
            .query("living_area", &100)
            .query("land_area", &500)
            .query("rooms", &4)
            .query("property_type", &"house")
            .query("predict", &true)
            .send()
            .await;
        response.assert_status_is_ok();
        let html = read_text(response).await?;
        assert!(html.contains(r#"id="prediction""#));
        assert!(html.contains("≈ 1,794,075 SEK"), "{}", html);
        assert!(!html.contains(r#"id="importance-chart""#));
        Ok(())
    }

    #[tokio::test]
    async fn get_fractional_area_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .get("/")
            .query("living_area", &72.5)
            .query("land_area", &47)
            .query("rooms", &2)
            .query("predict", &true)
            .send()
            .await;
        response.assert_status_is_ok();
        let html = read_text(response).await?;
        assert_eq!(html.matches(r#"step="any""#).count(), 2);
        assert!(html.contains(r#"value="72.5""#));
        assert!(html.contains(r#"id="prediction""#));
        Ok(())
    }

    #[tokio::test]
    async fn get_importance_chart_ok() -> Result {
        let client = create_test_client()?;
        let response = client.get("/").query("importance", &true).send().await;
        response.assert_status_is_ok();
        let html = read_text(response).await?;
        assert!(html.contains(r#"id="importance-chart""#));
        assert!(html.contains("De 5 viktigaste faktorerna enligt XGBoost"));
        assert!(!html.contains(r#"id="prediction""#));
        Ok(())
    }

    #[tokio::test]
    async fn get_clicked_location_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .get("/")
            .query("latitude", &57.70887)
            .query("longitude", &11.97456)
            .send()
            .await;
        response.assert_status_is_ok();
        let html = read_text(response).await?;
        assert!(html.contains(r#"id="chosen-latitude">57.70887<"#));
        Ok(())
    }

    #[tokio::test]
    async fn get_english_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .get("/")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await;
        response.assert_status_is_ok();
        let html = read_text(response).await?;
        assert!(html.contains("Property type"));
        Ok(())
    }

    #[tokio::test]
    async fn get_invalid_rooms_bad_request() -> Result {
        let client = create_test_client()?;
        let response = client.get("/").query("rooms", &42).send().await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn get_unparsable_area_bad_request() -> Result {
        let client = create_test_client()?;
        let response = client.get("/").query("living_area", &"lots").send().await;
        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}
