use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::geo::GeoOption;

#[derive(Properties, PartialEq)]
pub struct SearchableSelectProps {
    pub label: String,
    pub placeholder: String,
    pub options: Vec<GeoOption>,
    /// Currently selected code, if any.
    #[prop_or_default]
    pub selected: Option<String>,
    pub on_select: Callback<GeoOption>,
    #[prop_or(false)]
    pub disabled: bool,
    #[prop_or(false)]
    pub loading: bool,
}

/// Dropdown with free-text filtering. Each instance owns its open/search
/// state, so a page with many of these never shares or shifts UI state
/// between entries.
#[function_component(SearchableSelect)]
pub fn searchable_select(props: &SearchableSelectProps) -> Html {
    let open = use_state(|| false);
    let search = use_state(String::new);

    let selected_name = props
        .selected
        .as_ref()
        .and_then(|code| props.options.iter().find(|option| &option.code == code))
        .map(|option| option.name.clone());

    let toggle_open = {
        let open = open.clone();
        let search = search.clone();
        let disabled = props.disabled;
        Callback::from(move |_: MouseEvent| {
            if disabled {
                return;
            }
            if *open {
                search.set(String::new());
            }
            open.set(!*open);
        })
    };

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    let needle = search.to_lowercase();
    let filtered: Vec<GeoOption> = props
        .options
        .iter()
        .filter(|option| needle.is_empty() || option.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let button_text = if props.loading {
        "Loading...".to_string()
    } else {
        selected_name.unwrap_or_else(|| props.placeholder.clone())
    };

    html! {
        <div class="searchable-select">
            <label class="select-label">{&props.label}</label>
            <button
                type="button"
                class={classes!("select-trigger", props.disabled.then(|| "disabled"))}
                onclick={toggle_open}
                disabled={props.disabled || props.loading}
            >
                {button_text}
                <span class="select-caret">{if *open { "▴" } else { "▾" }}</span>
            </button>
            {
                if *open {
                    html! {
                        <div class="select-panel">
                            <input
                                type="text"
                                class="select-search"
                                placeholder="Search..."
                                value={(*search).clone()}
                                oninput={on_search}
                            />
                            <ul class="select-options">
                                {
                                    if filtered.is_empty() {
                                        html! { <li class="select-empty">{"No matches"}</li> }
                                    } else {
                                        filtered.iter().map(|option| {
                                            let on_select = props.on_select.clone();
                                            let open = open.clone();
                                            let search = search.clone();
                                            let choice = option.clone();
                                            let is_selected = props.selected.as_deref() == Some(option.code.as_str());
                                            let onclick = Callback::from(move |_: MouseEvent| {
                                                on_select.emit(choice.clone());
                                                search.set(String::new());
                                                open.set(false);
                                            });
                                            html! {
                                                <li
                                                    key={option.code.clone()}
                                                    class={classes!("select-option", is_selected.then(|| "selected"))}
                                                    {onclick}
                                                >
                                                    {&option.name}
                                                </li>
                                            }
                                        }).collect::<Html>()
                                    }
                                }
                            </ul>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
