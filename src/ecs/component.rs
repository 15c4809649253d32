// src/ecs/component.rs

/// 全てのコンポーネントが実装するマーカートレイトだよ。
///
/// 中身は空っぽだけど、`World` に入れていい型かどうかをこれで区別するんだ。
/// ホスト側で `Arc<Mutex<World>>` に包んで持つから `Send + Sync` も要求しておく。
pub trait Component: std::fmt::Debug + Send + Sync + 'static {}
