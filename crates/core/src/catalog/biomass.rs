use super::{ComponentRow, analysis, components, hint, spec_lines, strings};
use crate::model::{Difficulty, ImageRef, ImageRefError, ModuleDraft, ModuleId};

const COMPONENTS: &[ComponentRow] = &[
    (
        "FeedstockPreparation",
        "Feedstock Preparation",
        "Organic matter processing for optimal digestion conditions",
        "C/N Ratio: 25-30:1, Moisture: 40-60%, Size: <50mm, pH: 6.8-7.2",
        "Prepares organic substrate for efficient anaerobic digestion process",
        "images/components/feedstock_prep.png",
    ),
    (
        "MixingHeating",
        "Mixing & Heating",
        "Substrate homogenization and temperature control system",
        "Mixer Power: 5-15kW, Heating: 35-55°C, Control: PID, Sensors: Temperature/pH",
        "Maintains optimal temperature and mixing for bacterial activity",
        "images/components/mixing_heating.png",
    ),
    (
        "AnaerobicDigester",
        "Anaerobic Digester",
        "Sealed reactor vessel for biogas production via bacterial decomposition",
        "Volume: 100-5000m³, Pressure: 1-3 bar, Material: Steel/Concrete, HRT: 15-30 days",
        "Converts organic matter to biogas through anaerobic bacterial processes",
        "images/components/digester.png",
    ),
    (
        "GasProcessing",
        "Gas Processing",
        "Biogas purification and conditioning for engine compatibility",
        "H2S Removal: <1000ppm, CO2 Separation: Optional, Drying: <60% RH, Filtration: 5μm",
        "Removes impurities and conditions biogas for combustion engines",
        "images/components/gas_processing.png",
    ),
    (
        "GasEngine",
        "Gas Engine",
        "Internal combustion engine optimized for biogas fuel",
        "Power: 100kW-5MW, Speed: 1500rpm, Fuel: CH4 55-70%, Efficiency: 35-42%",
        "Converts chemical energy in biogas to mechanical rotation",
        "images/components/gas_engine.png",
    ),
    (
        "SynchronousGenerator",
        "Synchronous Generator",
        "AC generator for electrical power production from engine",
        "Power: 100kW-5MW, Voltage: 400V-11kV, Frequency: 50/60Hz, Efficiency: >95%",
        "Converts mechanical rotation to three-phase electrical power",
        "images/components/biomass_generator.png",
    ),
    (
        "PLCControlSystem",
        "PLC Control System",
        "Programmable logic controller for automated process control",
        "I/O Points: 100-500, HMI: Touchscreen, Communication: Ethernet/Modbus, Memory: 1MB+",
        "Monitors and controls digester parameters, safety systems, and power output",
        "images/components/plc_control.png",
    ),
    (
        "PowerConditioning",
        "Power Conditioning",
        "Generator synchronization and grid interface electronics",
        "Sync Unit: Automatic, Protection: Over/Under freq, THD: <5%, Power Factor: 0.8-1.0",
        "Synchronizes generator with grid and maintains power quality",
        "images/components/power_conditioning.png",
    ),
];

const REFERENCE_ORDER: &[&str] = &[
    "Feedstock Preparation",
    "Mixing & Heating",
    "Anaerobic Digester",
    "Gas Processing",
    "Gas Engine",
    "Synchronous Generator",
    "PLC Control System",
    "Power Conditioning",
];

const EXPLANATION: &[&str] = &[
    "Optimizes organic matter for digestion",
    "Creates ideal conditions for bacterial activity",
    "Biological conversion of organic matter to biogas",
    "Purifies biogas for engine compatibility",
    "Converts chemical energy to mechanical power",
    "Converts mechanical to electrical energy",
    "Automates and optimizes entire process",
    "Ensures grid-quality electrical output",
];

const SYSTEM_SPECS: &[(&str, &str)] = &[
    ("Power Rating", "100 kW - 10 MW"),
    ("Feedstock", "Organic waste, crops"),
    ("Gas Yield", "300-600 m³/tonne"),
    ("Methane Content", "55-70%"),
    ("Engine Efficiency", "35-42%"),
    ("Operating Temp", "35-55°C"),
    ("Retention Time", "15-30 days"),
];

const PROCESS: &str = "\
### Biogas Production Kinetics
**Hydrolysis Rate:** k1 = 0.1-0.3 day⁻¹ (rate-limiting step)
**Methanogenesis:** CH3COOH → CH4 + CO2 (acidogenesis → methanogenesis)
**Gas Yield:** 300-600 m³/tonne volatile solids (depends on C/N ratio)
**Methane Content:** 55-70% CH4, 30-45% CO2, <1% H2S
**Temperature Effect:** Mesophilic (35°C) vs Thermophilic (55°C)

### Power Generation Efficiency
**Overall Efficiency:** ηoverall = ηdigester × ηengine × ηgenerator
**Typical Values:** 35% digester × 40% engine × 95% generator ≈ 13% overall
**CHP Systems:** Combined heat and power can reach 80% total efficiency
";

const CONTROL: &str = "\
### PLC Control Architecture
**Process Variables:** Temperature, pH, gas flow, pressure, H2S content
**Control Loops:** PID temperature control, flow regulation, safety interlocks
**HMI Functions:** Real-time monitoring, alarm management, data logging
**Communication:** Modbus RTU/TCP, Ethernet, wireless sensors

### Safety & Protection Systems
**Gas Detection:** CH4, H2S, CO2 monitoring with alarm levels
**Pressure Relief:** Automatic venting systems for overpressure
**Fire Suppression:** CO2/foam systems for electrical equipment
**Emergency Shutdown:** Fail-safe systems for process isolation
";

pub(super) fn draft() -> Result<ModuleDraft, ImageRefError> {
    Ok(ModuleDraft {
        id: ModuleId::Biomass,
        title: "Biomass Energy System".into(),
        icon: "🌱".into(),
        difficulty: Difficulty::Advanced,
        task: "Complete the biomass energy conversion process from organic waste to electrical power"
            .into(),
        system_specs: spec_lines(SYSTEM_SPECS),
        overview_image: ImageRef::new("images/biomass_system.png")?,
        components: components(COMPONENTS)?,
        reference_order: strings(REFERENCE_ORDER),
        explanation: strings(EXPLANATION),
        hint: hint(
            &[
                ("Preparation Stage", "How is organic matter prepared?"),
                ("Biological Stage", "Where does anaerobic digestion occur?"),
                ("Processing Stage", "How is biogas purified?"),
                ("Conversion Stage", "How is chemical energy converted?"),
                ("Control Stage", "How is the process automated?"),
            ],
            "Prepare → Digest → Process → Convert → Control → Grid",
            &[
                "Start with organic matter preparation",
                "Then biological conversion (anaerobic digestion)",
                "Then gas processing and combustion",
                "Finally electrical generation & control",
            ],
            "Follow the energy conversion from biological to electrical!",
        ),
        analysis: analysis(&[
            ("Biomass Process Analysis", PROCESS),
            ("Control System Engineering", CONTROL),
        ]),
    })
}
