use yew::prelude::*;

use crate::checkout::models::{BusinessType, CheckoutData, VerificationStatus};

#[derive(Properties, PartialEq)]
pub struct ProfileStepProps {
    pub data: CheckoutData,
    pub on_change: Callback<CheckoutData>,
    pub on_next: Callback<()>,
    pub on_back: Callback<()>,
    #[prop_or(false)]
    pub busy: bool,
}

/// Organization profiling: business type, profile visibility and (for public
/// profiles) verification. These answers decide which steps follow.
#[function_component(ProfileStep)]
pub fn profile_step(props: &ProfileStepProps) -> Html {
    let set_business_type = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |business_type: BusinessType| {
            let mut updated = data.clone();
            updated.profile.business_type = Some(business_type);
            on_change.emit(updated);
        })
    };

    let set_visibility = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |public: bool| {
            let mut updated = data.clone();
            updated.profile.is_public_profile = Some(public);
            if !public {
                // Verification is a public-profile concept.
                updated.profile.verification_status = VerificationStatus::Unverified;
            }
            on_change.emit(updated);
        })
    };

    let set_verification = {
        let data = props.data.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |status: VerificationStatus| {
            let mut updated = data.clone();
            updated.profile.verification_status = status;
            on_change.emit(updated);
        })
    };

    let next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };
    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let profile = &props.data.profile;

    html! {
        <div class="wizard-body">
            <div class="form-field">
                <label>{"Business Type"}</label>
                <div class="choice-row">
                    <button
                        class={classes!("choice-button", (profile.business_type == Some(BusinessType::Registered)).then(|| "chosen"))}
                        onclick={{
                            let set = set_business_type.clone();
                            Callback::from(move |_| set.emit(BusinessType::Registered))
                        }}
                    >
                        {"Registered Business"}
                    </button>
                    <button
                        class={classes!("choice-button", (profile.business_type == Some(BusinessType::Unregistered)).then(|| "chosen"))}
                        onclick={{
                            let set = set_business_type.clone();
                            Callback::from(move |_| set.emit(BusinessType::Unregistered))
                        }}
                    >
                        {"Unregistered Business"}
                    </button>
                </div>
            </div>

            <div class="form-field">
                <label>{"Profile Visibility"}</label>
                <div class="choice-row">
                    <button
                        class={classes!("choice-button", (profile.is_public_profile == Some(true)).then(|| "chosen"))}
                        onclick={{
                            let set = set_visibility.clone();
                            Callback::from(move |_| set.emit(true))
                        }}
                    >
                        {"Public — listed with business locations"}
                    </button>
                    <button
                        class={classes!("choice-button", (profile.is_public_profile == Some(false)).then(|| "chosen"))}
                        onclick={{
                            let set = set_visibility.clone();
                            Callback::from(move |_| set.emit(false))
                        }}
                    >
                        {"Private — subscription only"}
                    </button>
                </div>
            </div>

            {
                if profile.is_public() {
                    html! {
                        <div class="form-field">
                            <label>{"Verification"}</label>
                            <div class="choice-row">
                                <button
                                    class={classes!("choice-button", (profile.verification_status == VerificationStatus::Verified).then(|| "chosen"))}
                                    onclick={{
                                        let set = set_verification.clone();
                                        Callback::from(move |_| set.emit(VerificationStatus::Verified))
                                    }}
                                >
                                    {"Get verified — multiple locations, larger gallery"}
                                </button>
                                <button
                                    class={classes!("choice-button", (profile.verification_status == VerificationStatus::Unverified).then(|| "chosen"))}
                                    onclick={{
                                        let set = set_verification.clone();
                                        Callback::from(move |_| set.emit(VerificationStatus::Unverified))
                                    }}
                                >
                                    {"Skip for now — single headquarters location"}
                                </button>
                            </div>
                            <p class="field-hint">
                                {"Verification adds a location fee collected in a separate payment step."}
                            </p>
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="wizard-actions">
                <button class="secondary-button" onclick={back}>{"Back"}</button>
                <button class="primary-button" onclick={next} disabled={props.busy}>
                    {if props.busy { "Saving..." } else { "Continue" }}
                </button>
            </div>
        </div>
    }
}
