pub mod styles;
pub mod pages;
pub mod config;

use yew::prelude::*;
use yew_router::prelude::*;
use crate::pages::mission_reward::MissionRewardPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
   #[at("/missions/:mission_set_id/reward")] MissionReward { mission_set_id: i64 },
   #[not_found]
   #[at("/404")] NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full">
                <div class="mx-auto">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
   match route {
       Route::MissionReward { mission_set_id } => html! { <MissionRewardPage mission_set_id={mission_set_id} /> },
       Route::NotFound => html! {
           <div class={styles::CONTAINER_LG}>
               <div class={styles::CARD}>
                   <h1 class={styles::TEXT_H2}>{"Page not found"}</h1>
               </div>
           </div>
       },
   }
}
