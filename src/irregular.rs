// 不规则变化表：精确匹配，优先于规则后缀

pub static IRREGULAR_PAST_TENSE: &[(&str, &str)] = &[
    ("go", "went"),
    ("have", "had"),
    ("do", "did"),
    ("say", "said"),
    ("get", "got"),
    ("make", "made"),
    ("know", "knew"),
    ("think", "thought"),
    ("take", "took"),
    ("see", "saw"),
    ("come", "came"),
    ("want", "wanted"),
    ("use", "used"),
    ("find", "found"),
    ("give", "gave"),
    ("tell", "told"),
    ("work", "worked"),
    ("call", "called"),
    ("try", "tried"),
    ("ask", "asked"),
    ("need", "needed"),
    ("feel", "felt"),
    ("become", "became"),
    ("leave", "left"),
    ("put", "put"),
    ("mean", "meant"),
    ("keep", "kept"),
    ("let", "let"),
    ("begin", "began"),
    ("seem", "seemed"),
    ("help", "helped"),
    ("show", "showed"),
    ("hear", "heard"),
    ("play", "played"),
    ("run", "ran"),
    ("move", "moved"),
    ("live", "lived"),
    ("believe", "believed"),
    ("bring", "brought"),
    ("happen", "happened"),
    ("write", "wrote"),
    ("sit", "sat"),
    ("stand", "stood"),
    ("lose", "lost"),
    ("pay", "paid"),
    ("meet", "met"),
    ("include", "included"),
    ("continue", "continued"),
    ("set", "set"),
    ("learn", "learned"),
    ("change", "changed"),
    ("lead", "led"),
    ("understand", "understood"),
    ("watch", "watched"),
    ("follow", "followed"),
    ("stop", "stopped"),
    ("create", "created"),
    ("speak", "spoke"),
    ("read", "read"),
    ("spend", "spent"),
    ("grow", "grew"),
    ("open", "opened"),
    ("walk", "walked"),
    ("win", "won"),
    ("teach", "taught"),
    ("offer", "offered"),
    ("remember", "remembered"),
    ("consider", "considered"),
    ("appear", "appeared"),
    ("buy", "bought"),
    ("serve", "served"),
    ("die", "died"),
    ("send", "sent"),
    ("build", "built"),
    ("stay", "stayed"),
    ("fall", "fell"),
    ("cut", "cut"),
    ("reach", "reached"),
    ("kill", "killed"),
    ("raise", "raised"),
    ("pass", "passed"),
    ("sell", "sold"),
    ("decide", "decided"),
    ("return", "returned"),
    ("explain", "explained"),
    ("hope", "hoped"),
    ("develop", "developed"),
    ("carry", "carried"),
    ("break", "broke"),
    ("receive", "received"),
    ("agree", "agreed"),
    ("support", "supported"),
    ("hit", "hit"),
    ("produce", "produced"),
    ("eat", "ate"),
    ("cover", "covered"),
    ("catch", "caught"),
    ("draw", "drew"),
];

pub static IRREGULAR_PAST_PARTICIPLE: &[(&str, &str)] = &[
    ("go", "gone"),
    ("do", "done"),
    ("see", "seen"),
    ("take", "taken"),
    ("give", "given"),
    ("know", "known"),
    ("come", "come"),
    ("show", "shown"),
    ("write", "written"),
    ("speak", "spoken"),
    ("break", "broken"),
    ("choose", "chosen"),
    ("fall", "fallen"),
    ("eat", "eaten"),
    ("draw", "drawn"),
    ("grow", "grown"),
    ("throw", "thrown"),
    ("fly", "flown"),
    ("drive", "driven"),
    ("ride", "ridden"),
    ("rise", "risen"),
    ("hide", "hidden"),
    ("bite", "bitten"),
    ("forget", "forgotten"),
];

pub static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("person", "people"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    // 单复数同形
    ("sheep", "sheep"),
    ("deer", "deer"),
    ("fish", "fish"),
    ("series", "series"),
    ("species", "species"),
];

// 后缀替换：动词/形容词 -> 名词
pub static NOUN_CONVERSIONS: &[(&str, &str)] = &[
    ("ate", "ation"),
    ("ify", "ification"),
    ("ize", "ization"),
    ("able", "ability"),
    ("ible", "ibility"),
];

pub static VERB_ENDINGS: &[&str] = &["ate", "ify", "ize", "en"];

pub static NOUN_ENDINGS: &[&str] = &["tion", "sion", "ment", "ness", "ity", "er", "or", "ist", "ism"];

pub static ADJECTIVE_ENDINGS: &[&str] = &["ful", "less", "ous", "ive", "able", "ible", "al", "ic"];

/// 在表中精确查找
pub fn lookup(table: &[(&str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(base, _)| *base == word)
        .map(|(_, form)| *form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_exact_match_only() {
        assert_eq!(lookup(IRREGULAR_PAST_TENSE, "go"), Some("went"));
        assert_eq!(lookup(IRREGULAR_PAST_TENSE, "goes"), None);
        assert_eq!(lookup(IRREGULAR_PLURALS, "sheep"), Some("sheep"));
    }

    #[test]
    fn tables_have_no_duplicate_keys() {
        for table in [IRREGULAR_PAST_TENSE, IRREGULAR_PAST_PARTICIPLE, IRREGULAR_PLURALS] {
            let mut keys: Vec<&str> = table.iter().map(|(k, _)| *k).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total);
        }
    }
}
