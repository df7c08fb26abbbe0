//! Built-in bilingual knowledge base for the community portal assistant.
//!
//! Entries are listed in priority order. Place-specific entries come before
//! the broader category they belong to (Sadar Hospital before hospitals,
//! emergencies before hospitals) because the first matching entry wins.

use crate::error::ConfigurationError;
use crate::rule_table::{RuleSpec, RuleTable, FALLBACK_ID};

type Entry = (&'static str, &'static [&'static str], &'static str);

const ENTRIES: &[Entry] = &[
    (
        "greeting",
        &[
            "hello",
            "hey there",
            "assalamu alaikum",
            "salam",
            "good morning",
            "good evening",
            "হ্যালো",
            "নমস্কার",
            "আসসালামু আলাইকুম",
            "সালাম",
            "শুভ সকাল",
        ],
        "হ্যালো! আমি আপনার কমিউনিটি সহায়ক। হাসপাতাল, ডাক্তার, বাস, থানা, পৌরসভা বা এলাকার ইতিহাস সম্পর্কে জিজ্ঞেস করুন।\n\
         Hello! I am your community assistant. Ask me about hospitals, doctors, buses, police stations, the municipality or local history.",
    ),
    (
        "thanks",
        &["thank", "ধন্যবাদ", "শুকরিয়া"],
        "আপনাকেও ধন্যবাদ! আর কিছু জানতে চাইলে জিজ্ঞেস করুন।\nYou're welcome! Ask me anything else you need.",
    ),
    (
        "farewell",
        &["goodbye", "bye", "আল্লাহ হাফেজ", "বিদায়"],
        "ভালো থাকবেন! প্রয়োজনে আবার আসবেন।\nTake care! Come back any time.",
    ),
    (
        "sadar_hospital",
        &["sadar hospital", "সদর হাসপাতাল"],
        "সদর হাসপাতাল ২৪ ঘণ্টা জরুরি বিভাগ চালু রাখে। বহির্বিভাগ সকাল ৮টা থেকে দুপুর ২টা পর্যন্ত খোলা। বিস্তারিত তথ্য 'হাসপাতাল' পাতায় পাবেন।\n\
         Sadar Hospital keeps its emergency ward open 24 hours. The outpatient department is open from 8 AM to 2 PM. See the Hospitals page for details.",
    ),
    (
        "emergency",
        &["emergency", "ambulance", "জরুরি", "অ্যাম্বুলেন্স", "999"],
        "জরুরি প্রয়োজনে ৯৯৯ নম্বরে কল করুন। অ্যাম্বুলেন্সের নম্বর 'হাসপাতাল' পাতায় দেওয়া আছে।\n\
         In an emergency call 999. Ambulance numbers are listed on the Hospitals page.",
    ),
    (
        "hospital",
        &["hospital", "clinic", "হাসপাতাল", "ক্লিনিক"],
        "এলাকার সরকারি ও বেসরকারি হাসপাতাল এবং ক্লিনিকের ঠিকানা ও ফোন নম্বর 'হাসপাতাল' পাতায় পাবেন।\n\
         Addresses and phone numbers of public and private hospitals and clinics are on the Hospitals page.",
    ),
    (
        "doctor",
        &["doctor", "physician", "ডাক্তার", "চিকিৎসক"],
        "বিশেষজ্ঞ ডাক্তারদের তালিকা, চেম্বারের সময় ও যোগাযোগের নম্বর 'ডাক্তার' পাতায় আছে।\n\
         The Doctors page lists specialists with chamber hours and contact numbers.",
    ),
    (
        "blood",
        &["blood", "রক্ত"],
        "রক্তদাতাদের তালিকা ও রক্তের গ্রুপ অনুযায়ী খোঁজার সুবিধা 'রক্তদাতা' পাতায় আছে।\n\
         Find blood donors by blood group on the Blood Donors page.",
    ),
    (
        "bus",
        &["bus", "transport", "বাস", "পরিবহন"],
        "বাসের সময়সূচি, রুট ও কাউন্টারের ফোন নম্বর 'বাস' পাতায় দেওয়া আছে।\n\
         Bus timetables, routes and counter phone numbers are on the Buses page.",
    ),
    (
        "police",
        &["police", "thana", "পুলিশ", "থানা"],
        "থানার ঠিকানা ও অফিসার ইনচার্জের নম্বর 'থানা' পাতায় পাবেন।\n\
         Police station addresses and officer-in-charge numbers are on the Police page.",
    ),
    (
        "fire_service",
        &["fire service", "fire", "ফায়ার সার্ভিস", "অগ্নি"],
        "ফায়ার সার্ভিসের জরুরি নম্বর ১৬১৬৩। স্থানীয় স্টেশনের নম্বর 'জরুরি সেবা' পাতায় আছে।\n\
         The fire service hotline is 16163. Local station numbers are on the Emergency Services page.",
    ),
    (
        "journalist",
        &["journalist", "press", "সাংবাদিক", "প্রেস ক্লাব"],
        "স্থানীয় সাংবাদিক ও প্রেস ক্লাবের তালিকা 'সাংবাদিক' পাতায় আছে।\n\
         Local journalists and the press club are listed on the Journalists page.",
    ),
    (
        "lawyer",
        &["lawyer", "advocate", "legal", "আইনজীবী", "উকিল"],
        "আইনজীবীদের নাম, আদালত ও যোগাযোগের তথ্য 'আইনজীবী' পাতায় পাবেন।\n\
         Lawyers with their courts and contact details are on the Lawyers page.",
    ),
    (
        "municipality",
        &["municipality", "pourashava", "mayor", "পৌরসভা", "মেয়র"],
        "পৌরসভার সেবা, কাউন্সিলরদের তালিকা ও অফিসের সময় 'পৌরসভা' পাতায় আছে।\n\
         Municipal services, the list of councillors and office hours are on the Municipality page.",
    ),
    (
        "union_parishad",
        &["union parishad", "chairman", "ইউনিয়ন পরিষদ", "চেয়ারম্যান"],
        "ইউনিয়ন পরিষদের চেয়ারম্যান ও সদস্যদের তথ্য 'ইউনিয়ন পরিষদ' পাতায় পাবেন।\n\
         Union Parishad chairmen and members are listed on the Union Parishad page.",
    ),
    (
        "education",
        &["school", "college", "education", "স্কুল", "কলেজ", "শিক্ষা"],
        "স্কুল, কলেজ ও মাদ্রাসার তালিকা 'শিক্ষা প্রতিষ্ঠান' পাতায় আছে।\n\
         Schools, colleges and madrasas are listed on the Educational Institutions page.",
    ),
    (
        "history",
        &["history", "culture", "heritage", "ইতিহাস", "ঐতিহ্য", "সংস্কৃতি"],
        "আমাদের জেলার ইতিহাস, ঐতিহ্য ও সংস্কৃতি নিয়ে বিস্তারিত লেখা 'ইতিহাস ও ঐতিহ্য' পাতায় পড়ুন।\n\
         Read about the district's history, heritage and culture on the History & Heritage page.",
    ),
    (
        "tourism",
        &["tourist", "visit", "দর্শনীয়", "ভ্রমণ"],
        "দর্শনীয় স্থান ও ভ্রমণ তথ্য 'দর্শনীয় স্থান' পাতায় দেওয়া আছে।\n\
         Places to visit and travel tips are on the Tourist Spots page.",
    ),
    (
        "help",
        &["help", "what can you do", "সাহায্য", "কি করতে পারো"],
        "আমি হাসপাতাল, ডাক্তার, রক্তদাতা, বাস, থানা, ফায়ার সার্ভিস, সাংবাদিক, আইনজীবী, পৌরসভা, শিক্ষা প্রতিষ্ঠান, ইতিহাস ও দর্শনীয় স্থান সম্পর্কে তথ্য দিতে পারি।\n\
         I can tell you about hospitals, doctors, blood donors, buses, police, the fire service, journalists, lawyers, the municipality, schools, history and tourist spots.",
    ),
];

const FALLBACK_RESPONSE: &str = "দুঃখিত, আমি বুঝতে পারিনি। অন্যভাবে লিখে আবার চেষ্টা করুন অথবা 'সাহায্য' লিখুন।\n\
     Sorry, I didn't understand that. Please try rephrasing, or type 'help' to see what I can answer.";

/// The built-in definition, in priority order, fallback last
pub fn default_specs() -> Vec<RuleSpec> {
    ENTRIES
        .iter()
        .map(|(id, triggers, response)| RuleSpec::rule(*id, triggers.iter().copied(), *response))
        .chain(std::iter::once(RuleSpec::fallback(
            FALLBACK_ID,
            FALLBACK_RESPONSE,
        )))
        .collect()
}

/// Build the built-in rule table
pub fn default_table() -> Result<RuleTable, ConfigurationError> {
    RuleTable::new(default_specs())
}
