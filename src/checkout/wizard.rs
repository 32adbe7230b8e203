use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::api::envelope::{auth_token, ApiEnvelope};
use crate::checkout::locations_step::LocationsStep;
use crate::checkout::machine::{advance, back, CheckoutStep};
use crate::checkout::models::CheckoutData;
use crate::checkout::packages_step::PackagesStep;
use crate::checkout::payment_step::{LocationPaymentStep, PaymentStep};
use crate::checkout::profile_step::ProfileStep;
use crate::config;

const STEP_ORDER: [CheckoutStep; 5] = [
    CheckoutStep::Packages,
    CheckoutStep::Profile,
    CheckoutStep::Locations,
    CheckoutStep::LocationPayment,
    CheckoutStep::Payment,
];

#[function_component(CheckoutWizard)]
pub fn checkout_wizard() -> Html {
    let step = use_state(|| CheckoutStep::Packages);
    let data = use_state(CheckoutData::default);
    let error = use_state(|| None::<String>);
    let organization_id = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    // Present when the payment gateway redirected back to us.
    let payment_reference = use_search_param("reference".to_string());

    let on_change = {
        let data = data.clone();
        Callback::from(move |updated: CheckoutData| data.set(updated))
    };

    // The only way forward. The profile step round-trips the organization
    // before the wizard moves on; every other step just advances.
    let on_next = {
        let step = step.clone();
        let data = data.clone();
        let error = error.clone();
        let organization_id = organization_id.clone();
        let submitting = submitting.clone();
        Callback::from(move |_: ()| {
            let current = *step;
            let snapshot = (*data).clone();
            match advance(current, &snapshot) {
                Err(step_error) => error.set(Some(step_error.to_string())),
                Ok(next_step) => {
                    error.set(None);
                    if current == CheckoutStep::Profile {
                        let step = step.clone();
                        let error = error.clone();
                        let organization_id = organization_id.clone();
                        let submitting = submitting.clone();
                        submitting.set(true);
                        spawn_local(async move {
                            match save_profile(&snapshot, (*organization_id).clone()).await {
                                Ok(id) => {
                                    organization_id.set(Some(id));
                                    step.set(next_step);
                                }
                                Err(message) => error.set(Some(message)),
                            }
                            submitting.set(false);
                        });
                    } else {
                        step.set(next_step);
                    }
                }
            }
        })
    };

    let on_back = {
        let step = step.clone();
        let data = data.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            if let Some(previous) = back(*step, &data) {
                error.set(None);
                step.set(previous);
            }
        })
    };

    let on_error = {
        let error = error.clone();
        Callback::from(move |message: Option<String>| error.set(message))
    };

    let realized_steps: Vec<CheckoutStep> = STEP_ORDER
        .iter()
        .copied()
        .filter(|candidate| match candidate {
            CheckoutStep::Locations => data.profile.is_public_profile != Some(false),
            CheckoutStep::LocationPayment => {
                data.profile.is_public_profile != Some(false) && data.profile.is_verified()
            }
            _ => true,
        })
        .collect();

    html! {
        <div class="page-container">
            <div class="page-panel wizard-panel">
                <h1 class="panel-title">{"Subscribe"}</h1>

                {
                    if let Some(reference) = payment_reference.as_deref().filter(|r| !r.is_empty()) {
                        html! {
                            <div class="info-section success">
                                {format!("Payment received. Reference: {}", reference)}
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }

                <ol class="wizard-progress">
                    {
                        realized_steps.iter().map(|candidate| {
                            let current = *candidate == *step;
                            html! {
                                <li class={classes!("wizard-step", current.then(|| "current"))}>
                                    {candidate.title()}
                                </li>
                            }
                        }).collect::<Html>()
                    }
                </ol>

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

                {
                    match *step {
                        CheckoutStep::Packages => html! {
                            <PackagesStep
                                data={(*data).clone()}
                                on_change={on_change.clone()}
                                on_next={on_next.clone()}
                            />
                        },
                        CheckoutStep::Profile => html! {
                            <ProfileStep
                                data={(*data).clone()}
                                on_change={on_change.clone()}
                                on_next={on_next.clone()}
                                on_back={on_back.clone()}
                                busy={*submitting}
                            />
                        },
                        CheckoutStep::Locations => html! {
                            <LocationsStep
                                data={(*data).clone()}
                                organization_id={(*organization_id).clone()}
                                on_change={on_change.clone()}
                                on_next={on_next.clone()}
                                on_back={on_back.clone()}
                                on_error={on_error.clone()}
                            />
                        },
                        CheckoutStep::LocationPayment => html! {
                            <LocationPaymentStep
                                data={(*data).clone()}
                                organization_id={(*organization_id).clone()}
                                on_next={on_next.clone()}
                                on_back={on_back.clone()}
                            />
                        },
                        CheckoutStep::Payment => html! {
                            <PaymentStep
                                data={(*data).clone()}
                                organization_id={(*organization_id).clone()}
                                on_back={on_back.clone()}
                            />
                        },
                    }
                }
            </div>
        </div>
    }
}

/// Creates the organization on first pass, updates it when the user comes
/// back and changes answers.
async fn save_profile(data: &CheckoutData, existing_id: Option<String>) -> Result<String, String> {
    let token = auth_token().ok_or_else(|| "Authentication token not found".to_string())?;
    let payload = json!({
        "business_type": data.profile.business_type,
        "is_public_profile": data.profile.is_public_profile,
        "verification_status": data.profile.verification_status,
    });
    let request = match &existing_id {
        Some(id) => Request::put(&format!(
            "{}/api/organizations/{}",
            config::get_backend_url(),
            id
        )),
        None => Request::post(&format!("{}/api/organizations", config::get_backend_url())),
    };
    let response = request
        .header("Authorization", &format!("Bearer {}", token))
        .header("Content-Type", "application/json")
        .json(&payload)
        .expect("Failed to serialize organization profile")
        .send()
        .await
        .map_err(|_| "Network error saving organization profile".to_string())?;

    #[derive(serde::Deserialize, Clone, PartialEq)]
    struct OrganizationCreated {
        id: String,
    }

    match response.json::<ApiEnvelope<OrganizationCreated>>().await {
        Ok(envelope) => match envelope.into_result("Failed to save organization profile") {
            Ok(created) => Ok(created.id),
            Err(message) => {
                // An update round-trip may return no payload; keep the id.
                if let Some(id) = existing_id {
                    Ok(id)
                } else {
                    Err(message)
                }
            }
        },
        Err(_) => Err("Failed to parse organization response".to_string()),
    }
}
