use siterank_core::schemas::board::Board;

use crate::{
    common::Backend,
    rows::{convert_lossy, RawArticle, RawCategory},
};

const CATEGORY_COLUMNS: &str = "id, name";
const ARTICLE_COLUMNS: &str = "
    id, title, content, category_id, created_at, updated_at,
    category:categories ( id, name )
";

/// Fetch the board's categories and articles together.
///
/// With `category` set, only that category's articles are kept.
pub async fn fetch_board(backend: &Backend, category: Option<&str>) -> anyhow::Result<Board> {
    let (categories, articles) = futures::try_join!(
        backend.select::<RawCategory>("categories", CATEGORY_COLUMNS, None),
        backend.select::<RawArticle>("articles", ARTICLE_COLUMNS, None),
    )?;

    let board = Board {
        categories: convert_lossy(categories, "category"),
        articles: convert_lossy(articles, "article"),
    };
    Ok(match category {
        Some(id) => board.only_category(id),
        None => board,
    })
}
