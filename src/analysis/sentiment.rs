// src/analysis/sentiment.rs
use anyhow::Result;
use tracing::debug;

use crate::config::SentimentConfig;
use crate::connectors::traits::SentimentClassifier;
use crate::types::SentimentReading;

/// Length-gating wrapper around the external sentiment classifier. The
/// classifier instance is passed in explicitly; there is no process-wide
/// model singleton.
pub struct SentimentAnalyzer {
    classifier: Box<dyn SentimentClassifier>,
    min_chars: usize,
}

impl SentimentAnalyzer {
    pub fn new(classifier: Box<dyn SentimentClassifier>, cfg: &SentimentConfig) -> Self {
        Self {
            classifier,
            min_chars: cfg.min_article_chars,
        }
    }

    /// Classifies one article text. Trimmed texts below the length gate never
    /// reach the classifier and come back as the skipped-NEUTRAL sentinel;
    /// short snippets historically produced meaningless high-confidence
    /// labels.
    pub async fn analyze(&self, text: &str) -> Result<SentimentReading> {
        let trimmed = text.trim();
        let chars = trimmed.chars().count();
        if chars < self.min_chars {
            debug!(chars, min = self.min_chars, "article too short, skipping classifier");
            return Ok(SentimentReading::skipped());
        }

        let mut reading = self.classifier.classify(trimmed).await?;
        reading.confidence = reading.confidence.clamp(0.0, 1.0);
        reading.skipped = false;
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::traits::MockSentimentClassifier;
    use crate::types::SentimentLabel;

    fn analyzer(mock: MockSentimentClassifier) -> SentimentAnalyzer {
        SentimentAnalyzer::new(Box::new(mock), &SentimentConfig::default())
    }

    #[tokio::test]
    async fn test_short_text_never_reaches_classifier() {
        let mut mock = MockSentimentClassifier::new();
        mock.expect_classify().times(0);

        let reading = analyzer(mock).analyze("ok").await.unwrap();
        assert_eq!(reading.label, SentimentLabel::Neutral);
        assert_eq!(reading.confidence, 1.0);
        assert!(reading.skipped);
    }

    #[tokio::test]
    async fn test_whitespace_padding_does_not_defeat_the_gate() {
        let mut mock = MockSentimentClassifier::new();
        mock.expect_classify().times(0);

        let padded = format!("{}short{}", " ".repeat(40), " ".repeat(40));
        let reading = analyzer(mock).analyze(&padded).await.unwrap();
        assert!(reading.skipped);
    }

    #[tokio::test]
    async fn test_long_text_is_classified_and_clamped() {
        let mut mock = MockSentimentClassifier::new();
        mock.expect_classify().times(1).returning(|_| {
            Ok(SentimentReading {
                label: SentimentLabel::Positive,
                confidence: 1.7,
                skipped: false,
            })
        });

        let text = "Bitcoin rallies hard after the spot ETF approval headlines.";
        let reading = analyzer(mock).analyze(text).await.unwrap();
        assert_eq!(reading.label, SentimentLabel::Positive);
        assert_eq!(reading.confidence, 1.0);
        assert!(!reading.skipped);
    }

    #[tokio::test]
    async fn test_classifier_errors_propagate() {
        let mut mock = MockSentimentClassifier::new();
        mock.expect_classify()
            .returning(|_| Err(anyhow::anyhow!("inference backend offline")));

        let text = "A long enough piece of market coverage to pass the gate.";
        assert!(analyzer(mock).analyze(text).await.is_err());
    }
}
