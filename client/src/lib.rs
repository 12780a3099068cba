use seed::{prelude::*, *};
use shared::{Activity, ApiConfig, Course, Generation, Mounts, Participation, Person, ResourceKind};

mod api;
mod list_editor;
mod logging;

// ------ ------
//     Init
// ------ ------

fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    let config = ApiConfig::from_setting(option_env!("CAPACITACIONES_API_URL"));
    tracing::info!(base_url = %config.base_url, "starting admin console");
    let mounts = Mounts::default();
    let page = mount(mounts.active(), &config, mounts.current(), orders);
    Model { config, mounts, page }
}

// ------ ------
//     Model
// ------ ------

struct Model {
    config: ApiConfig,
    mounts: Mounts,
    page: Page,
}

enum Page {
    Persons(list_editor::Model<Person>),
    Courses(list_editor::Model<Course>),
    Activities(list_editor::Model<Activity>),
    Participations(list_editor::Model<Participation>),
}

fn mount(kind: ResourceKind, config: &ApiConfig, generation: Generation, orders: &mut impl Orders<Msg>) -> Page {
    let config = config.clone();
    match kind {
        ResourceKind::Persons => Page::Persons(list_editor::init(
            config,
            &mut orders.proxy(move |msg| Msg::Persons(generation, msg)),
        )),
        ResourceKind::Courses => Page::Courses(list_editor::init(
            config,
            &mut orders.proxy(move |msg| Msg::Courses(generation, msg)),
        )),
        ResourceKind::Activities => Page::Activities(list_editor::init(
            config,
            &mut orders.proxy(move |msg| Msg::Activities(generation, msg)),
        )),
        ResourceKind::Participations => Page::Participations(list_editor::init(
            config,
            &mut orders.proxy(move |msg| Msg::Participations(generation, msg)),
        )),
    }
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    Navigate(ResourceKind),
    Persons(Generation, list_editor::Msg<Person>),
    Courses(Generation, list_editor::Msg<Course>),
    Activities(Generation, list_editor::Msg<Activity>),
    Participations(Generation, list_editor::Msg<Participation>),
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    let mounts = model.mounts;
    match msg {
        Msg::Navigate(kind) => {
            let generation = model.mounts.mount(kind);
            model.page = mount(kind, &model.config, generation, orders);
        }

        Msg::Persons(generation, msg) => match &mut model.page {
            Page::Persons(page) if mounts.accepts(ResourceKind::Persons, generation) => list_editor::update(
                msg,
                page,
                &mut orders.proxy(move |msg| Msg::Persons(generation, msg)),
            ),
            _ => drop_stale(orders, ResourceKind::Persons),
        },

        Msg::Courses(generation, msg) => match &mut model.page {
            Page::Courses(page) if mounts.accepts(ResourceKind::Courses, generation) => list_editor::update(
                msg,
                page,
                &mut orders.proxy(move |msg| Msg::Courses(generation, msg)),
            ),
            _ => drop_stale(orders, ResourceKind::Courses),
        },

        Msg::Activities(generation, msg) => match &mut model.page {
            Page::Activities(page) if mounts.accepts(ResourceKind::Activities, generation) => list_editor::update(
                msg,
                page,
                &mut orders.proxy(move |msg| Msg::Activities(generation, msg)),
            ),
            _ => drop_stale(orders, ResourceKind::Activities),
        },

        Msg::Participations(generation, msg) => match &mut model.page {
            Page::Participations(page) if mounts.accepts(ResourceKind::Participations, generation) => list_editor::update(
                msg,
                page,
                &mut orders.proxy(move |msg| Msg::Participations(generation, msg)),
            ),
            _ => drop_stale(orders, ResourceKind::Participations),
        },
    }
}

/// A completion for an editor that is no longer mounted.
fn drop_stale(orders: &mut impl Orders<Msg>, kind: ResourceKind) {
    tracing::debug!(resource = kind.path(), "dropping message for unmounted editor");
    orders.skip();
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> impl IntoNodes<Msg> {
    div![
        attrs! {At::Class => "container my-3"},
        nav_bar(model.mounts.active()),
        match &model.page {
            Page::Persons(page) => {
                let generation = model.mounts.current();
                list_editor::view(page).map_msg(move |msg| Msg::Persons(generation, msg))
            }
            Page::Courses(page) => {
                let generation = model.mounts.current();
                list_editor::view(page).map_msg(move |msg| Msg::Courses(generation, msg))
            }
            Page::Activities(page) => {
                let generation = model.mounts.current();
                list_editor::view(page).map_msg(move |msg| Msg::Activities(generation, msg))
            }
            Page::Participations(page) => {
                let generation = model.mounts.current();
                list_editor::view(page).map_msg(move |msg| Msg::Participations(generation, msg))
            }
        },
    ]
}

fn nav_bar(active: ResourceKind) -> Node<Msg> {
    nav![
        attrs! {At::Class => "navbar navbar-light bg-white border rounded mb-2"},
        a!["Gestión de Capacitaciones", attrs! {At::Class => "navbar-brand"}],
        ul![
            attrs! {At::Class => "nav nav-pills"},
            ResourceKind::ALL.iter().map(|&kind| {
                let class = if kind == active { "nav-link active" } else { "nav-link" };
                li![
                    attrs! {At::Class => "nav-item"},
                    button![
                        attrs! {At::Class => class, At::Type => "button"},
                        ev(Ev::Click, move |_| Msg::Navigate(kind)),
                        kind.title()
                    ]
                ]
            })
        ],
    ]
}

// ------ ------
//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    App::start("app", init, update, view);
}
