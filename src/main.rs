use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod api {
    pub mod envelope;
    pub mod geo;
    pub mod pricing;
}
mod components {
    pub mod confirm_modal;
    pub mod notification;
    pub mod searchable_select;
}
mod packages {
    pub mod form;
    pub mod list;
    pub mod models;
    pub mod validate;
}
mod default_pricing {
    pub mod form;
    pub mod list;
    pub mod models;
}
mod city_regions {
    pub mod form;
    pub mod list;
    pub mod models;
}
mod checkout {
    pub mod locations_step;
    pub mod machine;
    pub mod models;
    pub mod packages_step;
    pub mod payment_step;
    pub mod profile_step;
    pub mod wizard;
}

use checkout::wizard::CheckoutWizard;
use city_regions::form::CityRegionForm;
use city_regions::list::CityRegionsPage;
use default_pricing::form::DefaultPricingForm;
use default_pricing::list::DefaultPricingPage;
use packages::form::PackageForm;
use packages::list::PackagesPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Packages,
    #[at("/packages/new")]
    PackageNew,
    #[at("/packages/:id/edit")]
    PackageEdit { id: String },
    #[at("/pricing")]
    DefaultPricing,
    #[at("/pricing/new")]
    DefaultPricingNew,
    #[at("/pricing/:id/edit")]
    DefaultPricingEdit { id: String },
    #[at("/city-regions")]
    CityRegions,
    #[at("/city-regions/new")]
    CityRegionNew,
    #[at("/city-regions/:id/edit")]
    CityRegionEdit { id: String },
    #[at("/checkout")]
    Checkout,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Packages => {
            info!("Rendering Packages page");
            html! { <PackagesPage /> }
        }
        Route::PackageNew => {
            info!("Rendering Package form (create)");
            html! { <PackageForm /> }
        }
        Route::PackageEdit { id } => {
            info!("Rendering Package form (edit)");
            html! { <PackageForm id={Some(id)} /> }
        }
        Route::DefaultPricing => {
            info!("Rendering Default Pricing page");
            html! { <DefaultPricingPage /> }
        }
        Route::DefaultPricingNew => {
            info!("Rendering Default Pricing form (create)");
            html! { <DefaultPricingForm /> }
        }
        Route::DefaultPricingEdit { id } => {
            info!("Rendering Default Pricing form (edit)");
            html! { <DefaultPricingForm id={Some(id)} /> }
        }
        Route::CityRegions => {
            info!("Rendering City Regions page");
            html! { <CityRegionsPage /> }
        }
        Route::CityRegionNew => {
            info!("Rendering City Region form (create)");
            html! { <CityRegionForm /> }
        }
        Route::CityRegionEdit { id } => {
            info!("Rendering City Region form (edit)");
            html! { <CityRegionForm id={Some(id)} /> }
        }
        Route::Checkout => {
            info!("Rendering Checkout wizard");
            html! { <CheckoutWizard /> }
        }
        Route::NotFound => {
            html! {
                <div class="page-container">
                    <div class="page-panel">
                        <h1>{"Page not found"}</h1>
                        <Link<Route> to={Route::Packages} classes="back-link">
                            {"Back to Packages"}
                        </Link<Route>>
                    </div>
                </div>
            }
        }
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Packages} classes="nav-logo">
                    {"platform admin"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Packages} classes="nav-link">
                            {"Packages"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::DefaultPricing} classes="nav-link">
                            {"Default Pricing"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::CityRegions} classes="nav-link">
                            {"City Regions"}
                        </Link<Route>>
                    </div>
                    <div onclick={close_menu}>
                        <Link<Route> to={Route::Checkout} classes="nav-link">
                            {"Checkout"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting admin frontend");
    yew::Renderer::<App>::new().render();
}
