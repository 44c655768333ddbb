use serde::{Deserialize, Serialize};

/// Sentiment label used when the backend did not provide one.
pub const DEFAULT_SENTIMENT: &str = "Neutral";

/// A headline as returned by `GET /get_news`.
///
/// Field names follow the backend's column names verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// The headline text.
    #[serde(rename = "Headline")]
    pub headline: String,

    /// VADER sentiment label, e.g. "Positive", "Neutral" or "Negative".
    #[serde(
        rename = "Vader Sentiment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vader_sentiment: Option<String>,

    /// VADER compound score in `[-1, 1]`.
    #[serde(
        rename = "Vader Sentiment Score",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vader_score: Option<f64>,

    /// TextBlob polarity label.
    #[serde(
        rename = "TextBlob Sentiment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub textblob_sentiment: Option<String>,
}

impl NewsArticle {
    /// Create an article with only a headline.
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            vader_sentiment: None,
            vader_score: None,
            textblob_sentiment: None,
        }
    }

    /// Set the VADER sentiment label.
    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.vader_sentiment = Some(sentiment.into());
        self
    }

    /// Set the VADER compound score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.vader_score = Some(score);
        self
    }

    /// Set the TextBlob polarity label.
    pub fn with_textblob(mut self, sentiment: impl Into<String>) -> Self {
        self.textblob_sentiment = Some(sentiment.into());
        self
    }

    /// The TextBlob label, if the backend sent a non-empty one.
    pub fn textblob_label(&self) -> Option<&str> {
        self.textblob_sentiment.as_deref().filter(|label| !label.is_empty())
    }

    /// The sentiment label as provided, or [`DEFAULT_SENTIMENT`] when it is
    /// missing or empty.
    pub fn sentiment_label(&self) -> &str {
        match self.vader_sentiment.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_SENTIMENT,
        }
    }

    /// The style class for the sentiment pill: the label, lower-cased.
    pub fn sentiment_class(&self) -> String {
        self.sentiment_label().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record() {
        let article: NewsArticle = serde_json::from_value(json!({
            "Headline": "Stocks rally",
            "Vader Sentiment Score": 0.42,
            "Vader Sentiment": "Positive",
            "TextBlob Sentiment": "Neutral"
        }))
        .unwrap();
        assert_eq!(article.headline, "Stocks rally");
        assert_eq!(article.sentiment_label(), "Positive");
        assert_eq!(article.sentiment_class(), "positive");
        assert_eq!(article.vader_score, Some(0.42));
        assert_eq!(article.textblob_label(), Some("Neutral"));
    }

    #[test]
    fn missing_sentiment_is_neutral() {
        let article: NewsArticle =
            serde_json::from_value(json!({"Headline": "Markets flat"})).unwrap();
        assert_eq!(article.sentiment_label(), "Neutral");
        assert_eq!(article.sentiment_class(), "neutral");
    }

    #[test]
    fn empty_sentiment_is_neutral() {
        let article = NewsArticle::new("Quiet day").with_sentiment("");
        assert_eq!(article.sentiment_label(), "Neutral");
    }

    #[test]
    fn empty_textblob_is_absent() {
        assert_eq!(NewsArticle::new("A").textblob_label(), None);
        assert_eq!(NewsArticle::new("A").with_textblob("").textblob_label(), None);
    }

    #[test]
    fn label_case_is_preserved() {
        let article = NewsArticle::new("Oil slides").with_sentiment("NEGATIVE");
        assert_eq!(article.sentiment_label(), "NEGATIVE");
        assert_eq!(article.sentiment_class(), "negative");
    }
}
