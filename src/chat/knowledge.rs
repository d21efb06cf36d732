//! Offline answers used when no provider can respond.

use regex::Regex;
use std::sync::OnceLock;

const MAX_SENTENCES: usize = 3;

struct Topic {
    /// Matched against the start of a word; a trailing space demands the whole word.
    keywords: &'static [&'static str],
    sentences: &'static [&'static str],
}

const IRRIGATION: Topic = Topic {
    keywords: &["irrigat", "watering", "drip", "sprinkler", "water schedule"],
    sentences: &[
        "Irrigate early in the morning or late in the evening to reduce evaporation losses.",
        "Drip irrigation delivers water directly to the roots and can save 30-50% of water compared to flood irrigation.",
        "Check soil moisture before every irrigation and water only when the top few centimetres are dry.",
        "Deep, infrequent watering encourages stronger and deeper root growth than frequent light watering.",
    ],
};

const SOIL_MOISTURE: Topic = Topic {
    keywords: &["soil", "moisture", "dry ", "wet "],
    sentences: &[
        "Most field crops grow best when soil moisture stays between 40% and 60%.",
        "Below 30% soil moisture, plants start to wilt and irrigation should be scheduled soon.",
        "Above 70% soil moisture, roots can suffocate, so pause irrigation and improve drainage.",
        "Adding organic matter such as compost improves the soil's ability to hold water.",
    ],
};

const WATER_QUALITY: Topic = Topic {
    keywords: &["water quality", "tds", "ph ", "salin", "salt", "turbid", "clarity", "contamina"],
    sentences: &[
        "Irrigation water should ideally have a pH between 6.5 and 8.5.",
        "TDS below 500 ppm is safe for most crops, while levels above 1000 ppm can damage sensitive plants.",
        "Cloudy water can clog drip emitters, so install a filter if clarity is low.",
        "Test your water source at least once per season, especially after heavy rains or floods.",
    ],
};

const CONSERVATION: Topic = Topic {
    keywords: &["conserv", "drought", "save water", "saving water", "mulch", "rainwater", "scarcity"],
    sentences: &[
        "During drought, prioritize water for your most valuable crops.",
        "Mulching with straw or crop residue can cut soil evaporation by up to 70%.",
        "Harvest rainwater in farm ponds or tanks to use during dry spells.",
        "Fix leaking pipes and channels; small leaks waste large amounts of water over a season.",
    ],
};

const WEATHER: Topic = Topic {
    keywords: &["weather", "rain", "forecast", "temperature", "monsoon", "heat", "storm"],
    sentences: &[
        "Skip irrigation if more than 10 mm of rain is forecast in the next two days.",
        "Hot, windy days increase crop water demand, so check moisture more often during heat waves.",
        "Before a storm, clear drainage channels to prevent waterlogging.",
    ],
};

const RICE: Topic = Topic {
    keywords: &["rice", "paddy"],
    sentences: &[
        "Rice can be grown with alternate wetting and drying, letting the field dry slightly before re-flooding to save up to 30% water.",
        "Keep 2-5 cm of standing water in rice fields during flowering.",
        "Drain rice fields about two weeks before harvest.",
    ],
};

const WHEAT: Topic = Topic {
    keywords: &["wheat"],
    sentences: &[
        "Wheat needs water most at crown root initiation, about 20-25 days after sowing.",
        "Flowering and grain filling are also critical irrigation stages for wheat.",
        "Wheat usually needs 4-6 irrigations per season depending on soil type.",
    ],
};

const COTTON: Topic = Topic {
    keywords: &["cotton"],
    sentences: &[
        "Cotton is sensitive to waterlogging, so avoid over-irrigation.",
        "Flowering and boll formation are the most critical water stages for cotton.",
        "Alternate furrow irrigation works well for cotton and saves water.",
    ],
};

const SUGARCANE: Topic = Topic {
    keywords: &["sugarcane", "sugar cane"],
    sentences: &[
        "Sugarcane needs frequent irrigation during the grand growth phase.",
        "Drip irrigation with fertigation can raise sugarcane yields while using less water.",
        "Reduce irrigation for sugarcane in the month before harvest to raise sugar content.",
    ],
};

const MAIZE: Topic = Topic {
    keywords: &["maize", "corn "],
    sentences: &[
        "Maize is most sensitive to water stress at tasselling and silking.",
        "Maize does poorly in waterlogged soil, so ensure good field drainage.",
        "Irrigate maize every 8-10 days in dry weather, adjusting for soil type.",
    ],
};

const TOPICS: &[&Topic] = &[
    &IRRIGATION,
    &SOIL_MOISTURE,
    &WATER_QUALITY,
    &CONSERVATION,
    &WEATHER,
    &RICE,
    &WHEAT,
    &COTTON,
    &SUGARCANE,
    &MAIZE,
];

const GENERIC: &[&str] = &[
    "I can help with irrigation schedules, soil moisture and water quality.",
    "Ask me about water conservation, weather planning or crops like rice, wheat, cotton, sugarcane and maize.",
    "For example, try asking: how often should I irrigate my wheat field?",
];

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("valid word regex"))
}

/// Lower-cased words of `query`, space separated with a leading and trailing space.
fn normalize(query: &str) -> String {
    let lower = query.to_lowercase();
    let mut out = String::from(" ");
    for w in word_re().find_iter(&lower) {
        out.push_str(w.as_str());
        out.push(' ');
    }
    out
}

fn matches(normalized: &str, topic: &Topic) -> bool {
    topic
        .keywords
        .iter()
        .any(|k| normalized.contains(&format!(" {k}")))
}

/// Canned answer for `query`.
///
/// The pool is ordered by sentence rank first and topic order second, so a
/// question touching two topics gets the lead sentence of each before any
/// second sentence.
pub fn lookup(query: &str) -> String {
    let normalized = normalize(query);
    let matched: Vec<&Topic> = TOPICS
        .iter()
        .copied()
        .filter(|t| matches(&normalized, t))
        .collect();

    if matched.is_empty() {
        return GENERIC.join(" ");
    }

    let deepest = matched.iter().map(|t| t.sentences.len()).max().unwrap_or(0);
    let pool: Vec<&str> = (0..deepest)
        .flat_map(|rank| matched.iter().filter_map(move |t| t.sentences.get(rank).copied()))
        .collect();

    pool.into_iter()
        .take(MAX_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_deterministic() {
        let q = "How much water does cotton need in summer heat?";
        assert_eq!(lookup(q), lookup(q));
    }

    #[test]
    fn irrigation_and_rice_both_contribute() {
        let answer = lookup("How do I irrigate my rice field?");
        assert!(answer.contains(IRRIGATION.sentences[0]));
        assert!(answer.contains(RICE.sentences[0]));
    }

    #[test]
    fn drought_answer_comes_from_conservation() {
        let answer = lookup("What about drought?");
        assert!(answer.starts_with("During drought, prioritize water for your most valuable crops."));
        assert_eq!(answer, CONSERVATION.sentences[..3].join(" "));
    }

    #[test]
    fn unmatched_query_gets_all_generic_sentences() {
        assert_eq!(lookup("Who won the match yesterday?"), GENERIC.join(" "));
        assert_eq!(lookup(""), GENERIC.join(" "));
    }

    #[test]
    fn whole_word_keywords_do_not_match_inside_words() {
        // "phosphorus" must not trigger the pH keyword, "drain" must not trigger rain
        assert!(!matches(&normalize("phosphorus"), &WATER_QUALITY));
        assert!(!matches(&normalize("drain the field"), &WEATHER));
        assert!(matches(&normalize("what pH is best"), &WATER_QUALITY));
        assert!(matches(&normalize("Rainfall tomorrow"), &WEATHER));
    }

    #[test]
    fn answer_is_capped_at_three_sentences() {
        let answer = lookup("irrigation soil moisture water quality weather");
        let expected = [
            IRRIGATION.sentences[0],
            SOIL_MOISTURE.sentences[0],
            WATER_QUALITY.sentences[0],
        ]
        .join(" ");
        assert_eq!(answer, expected);
    }

    #[test]
    fn every_topic_has_three_to_five_sentences() {
        for t in TOPICS {
            assert!((3..=5).contains(&t.sentences.len()));
        }
    }
}
