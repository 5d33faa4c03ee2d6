//! Per-request server glue.

use preflight::prelude::*;
use preflight::server::prepare_request_with;
use preflight_core::test_utils::render_to_string;

fn view(text: &'static str) -> FunctionComponent {
    FunctionComponent::new("View", move |_: &Props, _: &Context| Element::host("div").child(text))
}

fn chunked_split(chunks: &'static [&'static str]) -> Split {
    split(SplitOptions::new(
        load_fn(|| async { Ok(Module::new(view("Loaded"))) }).with_chunks(chunks.iter().copied()),
        view("Loading"),
        view("Failed"),
    ))
}

#[test]
fn plugin_without_element_is_a_no_op() {
    let mut ctx = RenderContext::default();
    prepare_plugin(&mut ctx);
    assert!(ctx.element.is_none());
}

#[test]
fn plugin_wraps_element_in_a_provider() {
    let mut ctx = RenderContext::new(Element::of(view("hello")));
    prepare_plugin(&mut ctx);

    let element = ctx.element.clone().unwrap();
    assert_eq!(element.ty.name(), "PrepareProvider");
    assert_eq!(
        render_to_string(&element.into(), &Context::new()),
        "<div>hello</div>"
    );
}

#[tokio::test]
async fn request_without_element_prepares_nothing() {
    let mut ctx = RenderContext::default();
    assert!(prepare_request(&mut ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn request_returns_collected_preload_chunks() {
    let first = chunked_split(&["home"]);
    let second = chunked_split(&["feed", "ads"]);
    let app = Element::host("main")
        .child(first.element(Props::new()))
        .child(second.element(Props::new()));

    let mut ctx = RenderContext::new(app);
    let mut chunks = prepare_request(&mut ctx).await.unwrap();
    chunks.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    assert_eq!(
        chunks,
        vec![ChunkId::new("ads"), ChunkId::new("feed"), ChunkId::new("home")]
    );
    let markup = render_to_string(&ctx.element.clone().unwrap().into(), &Context::new());
    assert_eq!(markup, "<main><div>Loaded</div><div>Loaded</div></main>");
}

#[tokio::test]
async fn request_surfaces_hook_failures() {
    let broken = prepared(
        |_: Props, _: Context| async { Err(PrepareError::Failed("db down".into())) },
        PrepareOptions::default(),
    )
    .wrap(view("never"));

    let mut ctx = RenderContext::new(Element::of(broken));
    let config = TraversalConfig {
        fanout: Fanout::Joined,
        ..TraversalConfig::default()
    };
    let err = prepare_request_with(
        &mut ctx,
        &Traversal::new().with_config(config),
        Context::new().with("locale", "en"),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("db down"));
}
