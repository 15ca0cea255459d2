//! Shipped keyword table.
//!
//! Order matters: within a tier the first matching phrase wins. Reflux terms
//! precede `heart` so "heartburn" is not read as cardiac, and cerebral terms
//! precede vascular ones so "cerebrovascular" lands on the brain.

use super::{AssetId, Tier};

use AssetId::*;
use Tier::{Organ, Region};

pub(super) const RULES: &[(&str, AssetId, Tier)] = &[
    // reflux
    ("heartburn", Stomach, Organ),
    ("acid reflux", Stomach, Organ),
    // cardiac
    ("heart", Heart, Organ),
    ("cardiac", Heart, Organ),
    ("myocardial", Heart, Organ),
    ("coronary", Heart, Organ),
    ("angina", Heart, Organ),
    ("arrhythmia", Heart, Organ),
    ("atrial fibrillation", Heart, Organ),
    ("tachycardia", Heart, Organ),
    ("bradycardia", Heart, Organ),
    ("cardiomyopathy", Heart, Organ),
    // brain
    ("stroke", Brain, Organ),
    ("brain", Brain, Organ),
    ("cerebral", Brain, Organ),
    ("cerebrovascular", Brain, Organ),
    ("intracranial", Brain, Organ),
    ("transient ischemic attack", Brain, Organ),
    ("migraine", Brain, Organ),
    ("seizure", Brain, Organ),
    ("epilepsy", Brain, Organ),
    ("dementia", Brain, Organ),
    ("alzheimer", Brain, Organ),
    ("concussion", Brain, Organ),
    // vascular
    ("hypertension", BloodVessels, Organ),
    ("hypertensive", BloodVessels, Organ),
    ("aneurysm", BloodVessels, Organ),
    ("atherosclerosis", BloodVessels, Organ),
    ("vascular", BloodVessels, Organ),
    ("vasculitis", BloodVessels, Organ),
    ("thrombosis", BloodVessels, Organ),
    ("deep vein", BloodVessels, Organ),
    ("varicose", BloodVessels, Organ),
    ("peripheral artery", BloodVessels, Organ),
    // nerves
    ("neuropathy", NervousSystem, Organ),
    ("multiple sclerosis", NervousSystem, Organ),
    ("parkinson", NervousSystem, Organ),
    ("neuralgia", NervousSystem, Organ),
    ("nerve", NervousSystem, Organ),
    ("spinal cord", NervousSystem, Organ),
    ("sciatica", NervousSystem, Organ),
    ("numbness", NervousSystem, Organ),
    ("tingling", NervousSystem, Organ),
    // respiratory
    ("pneumonia", Lungs, Organ),
    ("asthma", Lungs, Organ),
    ("copd", Lungs, Organ),
    ("lung", Lungs, Organ),
    ("pulmonary", Lungs, Organ),
    ("bronch", Lungs, Organ),
    ("respiratory", Lungs, Organ),
    ("tuberculosis", Lungs, Organ),
    ("dyspnea", Lungs, Organ),
    // hepatic
    ("hepatitis", Liver, Organ),
    ("cirrhosis", Liver, Organ),
    ("liver", Liver, Organ),
    ("hepatic", Liver, Organ),
    ("jaundice", Liver, Organ),
    // endocrine pancreas
    ("diabetes", Pancreas, Organ),
    ("diabetic", Pancreas, Organ),
    ("pancrea", Pancreas, Organ),
    ("insulin", Pancreas, Organ),
    ("hyperglycemia", Pancreas, Organ),
    ("hba1c", Pancreas, Organ),
    // renal
    ("kidney", Kidneys, Organ),
    ("renal", Kidneys, Organ),
    ("nephr", Kidneys, Organ),
    ("glomerul", Kidneys, Organ),
    ("dialysis", Kidneys, Organ),
    ("ckd", Kidneys, Organ),
    // gastric
    ("gastritis", Stomach, Organ),
    ("stomach", Stomach, Organ),
    ("gastric", Stomach, Organ),
    ("peptic", Stomach, Organ),
    ("gerd", Stomach, Organ),
    ("dyspepsia", Stomach, Organ),
    // bowel
    ("colitis", Intestines, Organ),
    ("crohn", Intestines, Organ),
    ("bowel", Intestines, Organ),
    ("intestin", Intestines, Organ),
    ("colon", Intestines, Organ),
    ("diverticul", Intestines, Organ),
    ("appendicitis", Intestines, Organ),
    ("celiac", Intestines, Organ),
    ("ileus", Intestines, Organ),
    // regions
    ("hand pain", RegionHand, Region),
    ("wrist pain", RegionHand, Region),
    ("finger pain", RegionHand, Region),
    ("arm pain", RegionHand, Region),
    ("carpal tunnel", RegionHand, Region),
    ("trigger finger", RegionHand, Region),
    ("wrist fracture", RegionHand, Region),
    ("leg pain", RegionLeg, Region),
    ("knee pain", RegionLeg, Region),
    ("ankle pain", RegionLeg, Region),
    ("foot pain", RegionLeg, Region),
    ("thigh pain", RegionLeg, Region),
    ("calf pain", RegionLeg, Region),
    ("hip pain", RegionLeg, Region),
    ("ankle sprain", RegionLeg, Region),
    ("plantar fasciitis", RegionLeg, Region),
];
