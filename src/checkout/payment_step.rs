use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement};
use yew::prelude::*;

use crate::api::envelope::{auth_token, cached_user, ApiEnvelope};
use crate::checkout::models::CheckoutData;
use crate::config;
use crate::packages::models::format_amount;

#[derive(serde::Deserialize, Clone, PartialEq)]
struct PaymentInit {
    authorization_url: String,
}

async fn initialize_payment(
    path: &str,
    payload: serde_json::Value,
    fallback: &str,
) -> Result<String, String> {
    let token = auth_token().ok_or_else(|| "Authentication token not found".to_string())?;
    let response = Request::post(&format!("{}{}", config::get_backend_url(), path))
        .header("Authorization", &format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .json(&payload)
        .expect("Failed to serialize payment request")
        .send()
        .await
        .map_err(|_| fallback.to_string())?;
    match response.json::<ApiEnvelope<PaymentInit>>().await {
        Ok(envelope) => envelope.into_result(fallback).map(|init| init.authorization_url),
        Err(_) => Err(fallback.to_string()),
    }
}

fn redirect_to(url: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_href(url);
    }
}

#[derive(Properties, PartialEq)]
pub struct LocationPaymentStepProps {
    pub data: CheckoutData,
    pub organization_id: Option<String>,
    pub on_next: Callback<()>,
    pub on_back: Callback<()>,
}

/// Verification-fee collection for verified organizations. Initializing the
/// payment hands the user to the gateway; failure keeps them here with the
/// backend's own message when it sent one.
#[function_component(LocationPaymentStep)]
pub fn location_payment_step(props: &LocationPaymentStepProps) -> Html {
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let total = props.data.total_verification_fees();

    let pay = {
        let error = error.clone();
        let busy = busy.clone();
        let organization_id = props.organization_id.clone();
        let data = props.data.clone();
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| {
            let error = error.clone();
            let busy = busy.clone();
            let organization_id = organization_id.clone();
            let data = data.clone();
            let on_next = on_next.clone();
            busy.set(true);
            spawn_local(async move {
                let payload = json!({
                    "organization_id": organization_id,
                    "amount": data.total_verification_fees(),
                    "locations": data.locations.iter()
                        .filter(|l| l.saved)
                        .map(|l| json!({
                            "brand_name": l.brand_name,
                            "fee": l.city_region_fee,
                            "pricing_source": l.pricing_source,
                        }))
                        .collect::<Vec<_>>(),
                });
                match initialize_payment(
                    "/api/payments/location-verification/initialize",
                    payload,
                    "Failed to initialize verification payment",
                )
                .await
                {
                    Ok(url) => {
                        // The step only moves on once initialization
                        // succeeded; the gateway takes over from here.
                        on_next.emit(());
                        redirect_to(&url);
                    }
                    Err(message) => error.set(Some(message)),
                }
                busy.set(false);
            });
        })
    };

    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    html! {
        <div class="wizard-body">
            {
                if let Some(message) = (*error).as_ref() {
                    html! {
                        <div class="info-section error">
                            <span class="error-message">{message}</span>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="payment-summary">
                <h3>{"Location Verification"}</h3>
                <ul>
                    {
                        props.data.locations.iter().map(|location| {
                            html! {
                                <li key={location.id}>
                                    {format!(
                                        "{} — {}",
                                        if location.brand_name.is_empty() { location.kind.label().to_string() } else { location.brand_name.clone() },
                                        location.city_region_fee.map(format_amount).unwrap_or_else(|| "no fee".to_string())
                                    )}
                                    <span class="fee-source">
                                        {location.pricing_source.clone().unwrap_or_default()}
                                    </span>
                                </li>
                            }
                        }).collect::<Html>()
                    }
                </ul>
                <div class="payment-total">
                    <span>{"Total verification fees:"}</span>
                    <strong>{format_amount(total)}</strong>
                </div>
            </div>

            <div class="wizard-actions">
                <button class="secondary-button" onclick={back}>{"Back"}</button>
                <button class="primary-button" onclick={pay} disabled={*busy || total <= 0.0}>
                    {if *busy { "Redirecting..." } else { "Pay Verification Fee" }}
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PaymentStepProps {
    pub data: CheckoutData,
    pub organization_id: Option<String>,
    pub on_back: Callback<()>,
}

/// Final step: subscription payment for the selected packages.
#[function_component(PaymentStep)]
pub fn payment_step(props: &PaymentStepProps) -> Html {
    // Contact email prefills from the cached user object when present.
    let email = use_state(|| {
        cached_user()
            .and_then(|user| user.email)
            .unwrap_or_default()
    });
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let pay = {
        let error = error.clone();
        let busy = busy.clone();
        let email = email.clone();
        let organization_id = props.organization_id.clone();
        let data = props.data.clone();
        Callback::from(move |_: MouseEvent| {
            if email.trim().is_empty() {
                error.set(Some("Enter a contact email for the payment receipt".to_string()));
                return;
            }
            let error = error.clone();
            let busy = busy.clone();
            let email = (*email).clone();
            let organization_id = organization_id.clone();
            let data = data.clone();
            busy.set(true);
            spawn_local(async move {
                let payload = json!({
                    "organization_id": organization_id,
                    "email": email.trim(),
                    "amount": data.subscription_total(),
                    "packages": data.selected.iter().map(|selection| json!({
                        "package_id": selection.package_id,
                        "billing_cycle": selection.cycle.as_str(),
                        "price": selection.price,
                    })).collect::<Vec<_>>(),
                });
                match initialize_payment(
                    "/api/payments/subscription/initialize",
                    payload,
                    "Failed to initialize subscription payment",
                )
                .await
                {
                    Ok(url) => redirect_to(&url),
                    Err(message) => error.set(Some(message)),
                }
                busy.set(false);
            });
        })
    };

    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    html! {
        <div class="wizard-body">
            {
                if let Some(message) = (*error).as_ref() {
                    html! {
                        <div class="info-section error">
                            <span class="error-message">{message}</span>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="payment-summary">
                <h3>{"Order Summary"}</h3>
                <ul>
                    {
                        props.data.selected.iter().map(|selection| {
                            html! {
                                <li key={selection.package_id.clone()}>
                                    {format!(
                                        "{} ({}) — {}",
                                        selection.title,
                                        selection.cycle.label(),
                                        format_amount(selection.price)
                                    )}
                                </li>
                            }
                        }).collect::<Html>()
                    }
                </ul>
                <div class="payment-total">
                    <span>{"Total:"}</span>
                    <strong>{format_amount(props.data.subscription_total())}</strong>
                </div>
            </div>

            <div class="form-field">
                <label>{"Contact Email"}</label>
                <input type="email" value={(*email).clone()} oninput={on_email} />
            </div>

            <div class="wizard-actions">
                <button class="secondary-button" onclick={back}>{"Back"}</button>
                <button class="primary-button" onclick={pay} disabled={*busy}>
                    {if *busy { "Redirecting..." } else { "Proceed to Payment" }}
                </button>
            </div>
        </div>
    }
}
