//! Static rule tables behind the interpretation profiles.
//!
//! Single-key tables are exhaustive matches; composite keys live in
//! lazily built maps and may be sparse, a missing entry simply means the
//! rule has nothing to say for that combination.

use crate::ephemeris::Planet;
use crate::western::{DignityType, Element, Modality, ZodiacSign};
use std::collections::HashMap;

/// Core identity expressed by the Sun's sign
pub fn sign_identity(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "A pioneer who leads with courage and acts before doubt can settle in.",
        ZodiacSign::Taurus => "A steady builder who values comfort, loyalty and things made to last.",
        ZodiacSign::Gemini => "A curious connector who thinks out loud and thrives on variety.",
        ZodiacSign::Cancer => "A protector whose sense of self is rooted in home and belonging.",
        ZodiacSign::Leo => "A warm performer who shines by being generous and seen.",
        ZodiacSign::Virgo => "A thoughtful craftsperson who finds meaning in being useful.",
        ZodiacSign::Libra => "A diplomat who seeks balance, beauty and fair exchange.",
        ZodiacSign::Scorpio => "An intense investigator drawn to what lies beneath the surface.",
        ZodiacSign::Sagittarius => "An explorer who needs room to roam and a truth worth chasing.",
        ZodiacSign::Capricorn => "A strategist who earns respect through patience and discipline.",
        ZodiacSign::Aquarius => "An independent thinker who cares about the collective future.",
        ZodiacSign::Pisces => "A dreamer with porous boundaries and deep compassion.",
    }
}

/// How Venus in each sign approaches partnership
pub fn venus_style(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "Falls fast and pursues openly; loves the chase and honest passion.",
        ZodiacSign::Taurus => "Slow to commit and deeply loyal once settled; shows love through presence.",
        ZodiacSign::Gemini => "Courts with conversation and wit; needs a partner who stays interesting.",
        ZodiacSign::Cancer => "Nurturing and protective; love means building a safe shared world.",
        ZodiacSign::Leo => "Romantic and generous; wants to adore and be adored in return.",
        ZodiacSign::Virgo => "Shows care through attention to detail and practical devotion.",
        ZodiacSign::Libra => "Seeks an equal partnership with grace, harmony and mutual respect.",
        ZodiacSign::Scorpio => "All or nothing; bonds through intensity, trust and emotional depth.",
        ZodiacSign::Sagittarius => "Loves freedom within togetherness; partnership as shared adventure.",
        ZodiacSign::Capricorn => "Committed and reliable; treats love as something built over time.",
        ZodiacSign::Aquarius => "Friendship first; values a partner who respects independence.",
        ZodiacSign::Pisces => "Idealistic and devoted; seeks a soulful, almost spiritual union.",
    }
}

/// Emotional needs signalled by the Moon's element
pub fn emotional_need(element: Element) -> &'static str {
    match element {
        Element::Fire => "Needs enthusiasm, spontaneity and a partner who celebrates them.",
        Element::Earth => "Needs consistency, physical comfort and promises that are kept.",
        Element::Air => "Needs to talk feelings through and to be understood intellectually.",
        Element::Water => "Needs emotional attunement, closeness and safety to be vulnerable.",
    }
}

/// Emotional needs coloured by the Moon's house
pub fn moon_house_need(house: u8) -> Option<&'static str> {
    let need = match house {
        1 => "Feelings show on the surface; needs to be accepted as they are.",
        2 => "Security comes from stability and a sense of material safety.",
        3 => "Processes emotion through conversation and daily contact.",
        4 => "Home and family are the emotional anchor.",
        5 => "Needs play, romance and creative self-expression.",
        6 => "Feels settled through routine and caring for others.",
        7 => "Emotional balance depends strongly on close partnership.",
        8 => "Seeks deep merging and absolute trust.",
        9 => "Needs shared meaning, growth and room to explore.",
        10 => "Emotional security is tied to achievement and recognition.",
        11 => "Feels held by friendship and a wider community.",
        12 => "Needs solitude and a quiet place to recharge.",
        _ => return None,
    };
    Some(need)
}

/// Kind of partner sought, from the element on the seventh house cusp
pub fn partner_archetype(element: Element) -> &'static str {
    match element {
        Element::Fire => "Drawn to bold, energetic partners who spark action.",
        Element::Earth => "Drawn to grounded, dependable partners who build alongside them.",
        Element::Air => "Drawn to sociable, articulate partners who stimulate the mind.",
        Element::Water => "Drawn to sensitive, intuitive partners who meet them emotionally.",
    }
}

/// First impression given by the rising sign's element
pub fn persona(element: Element) -> &'static str {
    match element {
        Element::Fire => "Comes across as direct, lively and confident.",
        Element::Earth => "Comes across as composed, capable and reserved.",
        Element::Air => "Comes across as friendly, curious and articulate.",
        Element::Water => "Comes across as gentle, perceptive and private.",
    }
}

/// General approach to life shared by signs of a modality
pub fn modality_approach(modality: Modality) -> &'static str {
    match modality {
        Modality::Cardinal => "Initiates and sets direction.",
        Modality::Fixed => "Sustains, consolidates and sees things through.",
        Modality::Mutable => "Adapts, connects and keeps things moving.",
    }
}

/// Vocational direction from the sign on the tenth house cusp (or the Sun)
pub fn vocation(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "Entrepreneurship, emergency work, sport or anything that needs a first mover.",
        ZodiacSign::Taurus => "Finance, design, food, land or any field where quality compounds.",
        ZodiacSign::Gemini => "Writing, teaching, sales, media and roles built on communication.",
        ZodiacSign::Cancer => "Care work, hospitality, real estate and roles that protect people.",
        ZodiacSign::Leo => "Performance, leadership, education and creative direction.",
        ZodiacSign::Virgo => "Health, analysis, editing, engineering and skilled service.",
        ZodiacSign::Libra => "Law, mediation, design, diplomacy and client-facing work.",
        ZodiacSign::Scorpio => "Research, psychology, investigation, surgery and crisis work.",
        ZodiacSign::Sagittarius => "Publishing, travel, higher education, philosophy and law.",
        ZodiacSign::Capricorn => "Management, government, architecture and long-horizon institutions.",
        ZodiacSign::Aquarius => "Technology, science, activism and network building.",
        ZodiacSign::Pisces => "Arts, healing, spiritual work and charitable organizations.",
    }
}

/// Working style from Mars' element
pub fn work_style(element: Element) -> &'static str {
    match element {
        Element::Fire => "Works in bursts of energy; thrives on competition and clear goals.",
        Element::Earth => "Methodical and persistent; prefers tangible results over promises.",
        Element::Air => "Collaborative and idea-driven; works best with variety and discussion.",
        Element::Water => "Works from intuition and care; needs meaningful, emotionally safe teams.",
    }
}

/// Shape of long-term ambition from Saturn's modality
pub fn ambition(modality: Modality) -> &'static str {
    match modality {
        Modality::Cardinal => "Ambition to lead and to be accountable for outcomes.",
        Modality::Fixed => "Ambition to master a domain and build lasting authority.",
        Modality::Mutable => "Ambition to grow through many skills and changing roles.",
    }
}

/// Career emphasis of a planet placed in the tenth house
pub fn tenth_house_planet(planet: Planet) -> Option<&'static str> {
    let note = match planet {
        Planet::Sun => "Public visibility and leadership are central to the life path.",
        Planet::Moon => "Career choices follow emotional fulfilment; suits public-facing care.",
        Planet::Mercury => "Reputation is built on ideas, speech and writing.",
        Planet::Venus => "Success through charm, aesthetics and good relationships at work.",
        Planet::Mars => "Competitive drive to rise; suits independent or physical roles.",
        Planet::Jupiter => "Opportunity and recognition tend to come readily.",
        Planet::Saturn => "Slow, earned rise; responsibility arrives early.",
        Planet::Uranus => "Unconventional path with sudden career changes.",
        Planet::Neptune => "Vocation as calling; artistic or healing professions.",
        Planet::Pluto => "Drawn to power and transformation within institutions.",
        Planet::Chiron => "Career may grow out of healing one's own wounds.",
        Planet::NorthNode | Planet::SouthNode => return None,
    };
    Some(note)
}

pub fn dignity_note(dignity: DignityType) -> &'static str {
    match dignity {
        DignityType::Rulership => "at home and expressed with ease",
        DignityType::Exaltation => "exalted and expressed at its best",
        DignityType::ExactExaltation => "at its exact degree of exaltation",
        DignityType::Detriment => "in detriment and working against its nature",
        DignityType::Fall => "in fall and needing conscious effort",
    }
}

lazy_static::lazy_static! {
    /// Trait keywords for the personal and social planets by element
    static ref PLANET_ELEMENT_TRAITS: HashMap<(Planet, Element), &'static str> = {
        let mut m = HashMap::new();
        m.insert((Planet::Mercury, Element::Fire), "quick-witted");
        m.insert((Planet::Mercury, Element::Earth), "practical thinker");
        m.insert((Planet::Mercury, Element::Air), "articulate");
        m.insert((Planet::Mercury, Element::Water), "intuitive mind");
        m.insert((Planet::Venus, Element::Fire), "passionate");
        m.insert((Planet::Venus, Element::Earth), "sensual");
        m.insert((Planet::Venus, Element::Air), "charming");
        m.insert((Planet::Venus, Element::Water), "tender");
        m.insert((Planet::Mars, Element::Fire), "bold");
        m.insert((Planet::Mars, Element::Earth), "tenacious");
        m.insert((Planet::Mars, Element::Air), "strategic");
        m.insert((Planet::Mars, Element::Water), "protective");
        m.insert((Planet::Jupiter, Element::Fire), "optimistic");
        m.insert((Planet::Jupiter, Element::Earth), "prudent");
        m.insert((Planet::Jupiter, Element::Air), "open-minded");
        m.insert((Planet::Jupiter, Element::Water), "generous");
        m.insert((Planet::Saturn, Element::Fire), "self-driven");
        m.insert((Planet::Saturn, Element::Earth), "disciplined");
        m.insert((Planet::Saturn, Element::Air), "principled");
        m.insert((Planet::Saturn, Element::Water), "resilient");
        m
    };

    /// Shadow themes for difficult contacts, keyed by planet pair in enum order
    static ref SHADOW_CONTACTS: HashMap<(Planet, Planet), (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        m.insert(
            (Planet::Venus, Planet::Pluto),
            ("Control and obsession", "Love can feel all-consuming; practice trust without possession."),
        );
        m.insert(
            (Planet::Moon, Planet::Pluto),
            ("Emotional intensity", "Old hurts resurface in intimacy; work through fear of abandonment."),
        );
        m.insert(
            (Planet::Venus, Planet::Saturn),
            ("Fear of rejection", "Affection is guarded; learn that being loved does not have to be earned."),
        );
        m.insert(
            (Planet::Moon, Planet::Saturn),
            ("Emotional restraint", "Feelings are held back; allow needs to be spoken."),
        );
        m.insert(
            (Planet::Venus, Planet::Uranus),
            ("Push and pull", "Closeness triggers a need for escape; name the need for space early."),
        );
        m.insert(
            (Planet::Venus, Planet::Neptune),
            ("Idealization", "Partners are seen as they could be; check fantasy against reality."),
        );
        m.insert(
            (Planet::Venus, Planet::Mars),
            ("Desire and friction", "Attraction and conflict run together; keep heat from becoming a fight."),
        );
        m
    };
}

pub fn planet_element_trait(planet: Planet, element: Element) -> Option<&'static str> {
    PLANET_ELEMENT_TRAITS.get(&(planet, element)).copied()
}

/// Shadow theme for a pair of planets, in either order
pub fn shadow_contact(a: Planet, b: Planet) -> Option<(&'static str, &'static str)> {
    let key = if a <= b { (a, b) } else { (b, a) };
    SHADOW_CONTACTS.get(&key).copied()
}
