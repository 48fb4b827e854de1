//! Symbol Resolution
//!
//! Turns a recorded span back into a live symbol. The document model is an
//! injected capability: anything that can hand out a syntax root and a
//! semantic model, possibly after background parsing or analysis, can
//! implement `SymbolDocument`.
//!
//! # Outcomes
//!
//! - `Ok(Some(symbol))` - the span names a declaration
//! - `Ok(None)` - nothing is declared at the span (e.g. the source changed
//!   since the record was written)
//! - `Err(Cancelled)` - the token fired before resolution finished
//! - `Err(Document(e))` - the document model failed; `e` is passed through
//!
//! Spans are not validated against the document snapshot. A stale span is
//! the caller's problem and usually shows up as `Ok(None)`.

use std::future::Future;

use crate::cancel::CancellationToken;
use crate::span::TextSpan;

/// Root of a parsed syntax tree.
pub trait SyntaxRoot {
    type Node;

    /// The node covering `span`, if the tree has one.
    fn find_node(&self, span: TextSpan) -> Option<Self::Node>;
}

/// Semantic information for one document snapshot.
pub trait SemanticModel {
    type Node;
    type Symbol;

    /// The symbol declared by `node`, if `node` is a declaration.
    fn declared_symbol(&self, node: &Self::Node) -> Option<Self::Symbol>;
}

/// A document that symbols can be resolved against.
///
/// Both accessors may suspend while the document is parsed or analysed.
pub trait SymbolDocument {
    type Root: SyntaxRoot;
    type Model: SemanticModel<Node = <Self::Root as SyntaxRoot>::Node>;
    type Error: std::error::Error + 'static;

    fn syntax_root(&self) -> impl Future<Output = Result<Self::Root, Self::Error>>;

    fn semantic_model(&self) -> impl Future<Output = Result<Self::Model, Self::Error>>;
}

/// Failure to resolve a symbol.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError<E> {
    #[error("symbol resolution was cancelled")]
    Cancelled,
    #[error("document model failed")]
    Document(#[source] E),
}

impl<E> ResolveError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }
}

/// Resolve the symbol declared at `span` in `document`.
///
/// Cancellation is checked before and raced against each document fetch. A
/// cancelled resolution never yields a symbol.
#[tracing::instrument(level = "debug", skip_all, fields(text_span = %span))]
pub async fn resolve_symbol<D: SymbolDocument>(
    span: TextSpan,
    document: &D,
    cancel: &CancellationToken,
) -> Result<Option<<D::Model as SemanticModel>::Symbol>, ResolveError<D::Error>> {
    let root = until_cancelled(cancel, document.syntax_root())
        .await
        .ok_or(ResolveError::Cancelled)?
        .map_err(ResolveError::Document)?;

    let Some(node) = root.find_node(span) else {
        tracing::debug!("no syntax node at span");
        return Ok(None);
    };

    let model = until_cancelled(cancel, document.semantic_model())
        .await
        .ok_or(ResolveError::Cancelled)?
        .map_err(ResolveError::Document)?;

    if cancel.is_cancelled() {
        return Err(ResolveError::Cancelled);
    }

    let symbol = model.declared_symbol(&node);
    if symbol.is_none() {
        tracing::debug!("node at span declares no symbol");
    }
    Ok(symbol)
}

/// Drive `fut` unless `cancel` fires first. `None` means cancelled.
async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> Option<F::Output> {
    if cancel.is_cancelled() {
        return None;
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        output = fut => Some(output),
    }
}
