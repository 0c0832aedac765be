use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A community board post.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Option<Category>,
}

/// The board page: its category tabs and every article.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub categories: Vec<Category>,
    pub articles: Vec<Article>,
}

impl Board {
    /// Articles filed under the category with the given id.
    pub fn articles_in<'x>(&'x self, category_id: &'x str) -> impl Iterator<Item = &'x Article> + 'x {
        self.articles
            .iter()
            .filter(move |a| a.category_id.as_deref() == Some(category_id))
    }

    /// Keep only the articles of one category, dropping every other one.
    pub fn only_category(mut self, category_id: &str) -> Self {
        self.articles
            .retain(|a| a.category_id.as_deref() == Some(category_id));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Article, Board, Category};

    fn article(id: &str, category_id: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            title: format!("post {}", id),
            content: String::new(),
            category_id: category_id.map(str::to_string),
            created_at: None,
            updated_at: None,
            category: None,
        }
    }

    #[test]
    fn test_category_filter() {
        let board = Board {
            categories: vec![Category {
                id: "news".to_string(),
                name: "News".to_string(),
            }],
            articles: vec![
                article("1", Some("news")),
                article("2", None),
                article("3", Some("free")),
                article("4", Some("news")),
            ],
        };

        let ids: Vec<_> = board.articles_in("news").map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(board.articles_in("missing").count(), 0);

        let news = board.only_category("news");
        assert_eq!(news.articles.len(), 2);
        assert_eq!(news.categories.len(), 1);
    }
}
