use serde::Deserialize;

/// Minimal Google STT response mapping.
/// Reference: https://cloud.google.com/speech-to-text/docs/reference/rest/v1/speech/recognize
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
    #[serde(default)]
    pub total_billed_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
    #[serde(default)]
    pub channel_tag: Option<i32>,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Every alternative of every result, segment by segment, in response order.
pub fn flatten_alternatives(resp: RecognizeResponse) -> Vec<String> {
    resp.results
        .into_iter()
        .flat_map(|result| result.alternatives)
        .map(|alt| alt.transcript)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(segments: usize, alternatives: usize) -> String {
        let results: Vec<_> = (0..segments)
            .map(|s| {
                let alts: Vec<_> = (0..alternatives)
                    .map(|a| serde_json::json!({ "transcript": format!("s{s}a{a}"), "confidence": 0.5 }))
                    .collect();
                serde_json::json!({ "alternatives": alts, "languageCode": "en-us" })
            })
            .collect();
        serde_json::json!({ "results": results, "totalBilledTime": "15s" }).to_string()
    }

    #[test]
    fn flattens_segment_then_alternative() {
        let resp: RecognizeResponse = serde_json::from_str(&response_with(3, 2)).unwrap();
        assert_eq!(resp.total_billed_time.as_deref(), Some("15s"));

        let texts = flatten_alternatives(resp);
        assert_eq!(texts, vec!["s0a0", "s0a1", "s1a0", "s1a1", "s2a0", "s2a1"]);
    }

    #[test]
    fn empty_body_means_no_transcript() {
        let resp: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(flatten_alternatives(resp).is_empty());
    }

    #[test]
    fn segments_without_alternatives_are_skipped() {
        let body = r#"{"results":[{"alternatives":[]},{"alternatives":[{"transcript":"hello world"}]},{}]}"#;
        let resp: RecognizeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(flatten_alternatives(resp), vec!["hello world"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let body = r#"{"results":[{"alternatives":[{"transcript":"same"},{"transcript":"same"}]}]}"#;
        let resp: RecognizeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(flatten_alternatives(resp), vec!["same", "same"]);
    }
}
