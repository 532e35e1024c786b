use crate::domain::SubjectArea;

const PROGRAMMING_KEYWORDS: &[&str] = &[
    "code", "python", "java", "javascript", "html", "css", "react", "angular", "vue", "node",
    "api", "database", "sql", "algorithm", "data structure", "function", "class", "object",
    "variable", "loop", "array", "string", "programming", "software", "development", "debugging",
    "error", "syntax", "framework", "library", "package", "import", "export", "git", "github",
];

const MATHEMATICS_KEYWORDS: &[&str] = &[
    "equation", "calculate", "solve", "mathematics", "algebra", "calculus", "geometry",
    "trigonometry", "statistics", "probability", "derivative", "integral", "matrix", "vector",
    "graph", "function", "formula", "theorem", "proof", "number", "prime", "factorial",
    "logarithm", "exponential", "polynomial", "quadratic", "linear", "differential",
];

const SCIENCE_KEYWORDS: &[&str] = &[
    "chemistry", "physics", "biology", "experiment", "theory", "molecular", "atom", "electron",
    "proton", "neutron", "chemical", "reaction", "element", "compound", "mixture", "solution",
    "acid", "base", "cell", "dna", "rna", "protein", "enzyme", "organism", "ecosystem",
    "evolution", "genetics", "photosynthesis", "respiration", "force", "energy", "motion",
    "velocity", "acceleration", "gravity", "wave",
];

const LITERATURE_KEYWORDS: &[&str] = &[
    "literature", "poem", "poetry", "novel", "story", "character", "plot", "theme", "metaphor",
    "simile", "symbolism", "irony", "author", "writer", "book", "essay", "analysis", "critique",
    "narrative", "dialogue", "setting", "conflict", "climax", "shakespeare", "dickens", "prose",
    "verse", "stanza", "rhyme",
];

const HISTORY_KEYWORDS: &[&str] = &[
    "history", "historical", "ancient", "medieval", "modern", "war", "battle", "empire",
    "kingdom", "civilization", "revolution", "independence", "freedom", "colonial", "mughal",
    "british", "gandhi", "nehru", "partition", "constitution", "democracy",
];

/// Categories in tie-break order: on equal scores the earlier entry wins.
const CATEGORIES: [(SubjectArea, &[&str]); 5] = [
    (SubjectArea::Programming, PROGRAMMING_KEYWORDS),
    (SubjectArea::Mathematics, MATHEMATICS_KEYWORDS),
    (SubjectArea::Science, SCIENCE_KEYWORDS),
    (SubjectArea::Literature, LITERATURE_KEYWORDS),
    (SubjectArea::History, HISTORY_KEYWORDS),
];

/// Number of keywords of each category occurring as substrings of the lower-cased text.
pub fn subject_scores(text: &str) -> [(SubjectArea, usize); 5] {
    let lowered = text.to_lowercase();
    CATEGORIES.map(|(subject, keywords)| {
        let score = keywords.iter().filter(|k| lowered.contains(*k)).count();
        (subject, score)
    })
}

pub fn classify_subject(text: &str) -> SubjectArea {
    let mut best = (SubjectArea::General, 0);

    for (subject, score) in subject_scores(text) {
        if score > best.1 {
            best = (subject, score);
        }
    }

    best.0
}
