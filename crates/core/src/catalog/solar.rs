use super::{ComponentRow, analysis, components, hint, spec_lines, strings};
use crate::model::{Difficulty, ImageRef, ImageRefError, ModuleDraft, ModuleId};

const COMPONENTS: &[ComponentRow] = &[
    (
        "PNJunction",
        "PN Junction (Silicon Cell)",
        "Core semiconductor device - converts photons to electron-hole pairs",
        "Bandgap: 1.12 eV, Voc: 0.6V, Isc: 9A/cm²",
        "Photovoltaic effect - light → electrical energy conversion",
        "images/components/pn_junction.png",
    ),
    (
        "AntiReflectiveCoating",
        "Anti-Reflective Coating",
        "Optical coating to minimize reflection losses",
        "Material: Si₃N₄, Thickness: 70-80nm, Refractive Index: 2.0",
        "Reduces reflection from 30% to <2% - increases light absorption",
        "images/components/ar_coating.png",
    ),
    (
        "FrontContactGrid",
        "Front Contact Grid",
        "Silver conductive fingers for current collection",
        "Width: 100-150μm, Resistance: <5mΩ, Coverage: 3-5%",
        "Collects generated current with minimal shading loss",
        "images/components/front_contact.png",
    ),
    (
        "BackSurfaceField",
        "Back Surface Field",
        "Heavily doped p+ layer for electron reflection",
        "Doping: 10¹⁹ cm⁻³, Thickness: 0.5μm, Material: Al-Si",
        "Creates electric field to repel minority carriers",
        "images/components/back_surface.png",
    ),
    (
        "MPPTController",
        "MPPT Controller",
        "Maximum Power Point Tracking for optimal energy harvesting",
        "Efficiency: >98%, Algorithm: P&O/InCond, Response: <1s",
        "Dynamic impedance matching - maintains MPP under varying conditions",
        "images/components/mppt_controller.png",
    ),
    (
        "DCACInverter",
        "DC-AC Inverter",
        "Power electronics for grid synchronization",
        "THD: <3%, Efficiency: >96%, Switching: PWM 20kHz",
        "Converts DC to AC with grid-quality waveform",
        "images/components/inverter.png",
    ),
    (
        "BatteryStorage",
        "Battery Storage",
        "Energy storage system for load balancing",
        "Type: Li-ion, Capacity: 100-400Ah, Voltage: 48V",
        "Stores excess energy, provides power during low irradiance",
        "images/components/battery.png",
    ),
];

const REFERENCE_ORDER: &[&str] = &[
    "Anti-Reflective Coating",
    "Front Contact Grid",
    "PN Junction (Silicon Cell)",
    "Back Surface Field",
    "MPPT Controller",
    "Battery Storage",
    "DC-AC Inverter",
];

const EXPLANATION: &[&str] = &[
    "First contact with sunlight, minimizes losses",
    "Collects photogenerated current",
    "Core conversion element (photovoltaic effect)",
    "Improves collection efficiency",
    "Optimizes power extraction",
    "Stores energy for later use",
    "Converts to usable AC power",
];

const SYSTEM_SPECS: &[(&str, &str)] = &[
    ("Power Rating", "5-400 kW"),
    ("Cell Type", "Monocrystalline Si"),
    ("Efficiency", "18-22%"),
    ("Voltage", "24-48V DC"),
    ("Current", "8-12A per panel"),
    ("Lifespan", "25+ years"),
    ("Applications", "Grid-tie, Off-grid"),
];

const PERFORMANCE: &str = "\
### I-V Characteristic Analysis
**Short Circuit Current (Isc):** Isc = IL - I0(e^(qVoc/nkT) - 1) ≈ IL
**Open Circuit Voltage (Voc):** Voc = (nkT/q) × ln(IL/I0 + 1)
**Maximum Power Point:** Pmax = Vmp × Imp
**Fill Factor:** FF = (Vmp × Imp)/(Voc × Isc)
**Efficiency:** η = Pmax/(Pin × Area)

### Temperature Effects
- **Voltage coefficient:** -0.4%/°C
- **Current coefficient:** +0.05%/°C
- **Power coefficient:** -0.45%/°C
";

const CIRCUIT: &str = "\
### Equivalent Circuit Model
**Single Diode Model:** I = IL - I0(e^((V+IRs)/nVt) - 1) - (V+IRs)/Rsh

**Parameters:**
- IL: Light-generated current
- I0: Dark saturation current
- Rs: Series resistance (1-5Ω)
- Rsh: Shunt resistance (>1000Ω)
- n: Ideality factor (1-2)

### MPPT Algorithms
**Perturb & Observe:** Simple, 95-98% efficiency
**Incremental Conductance:** Better performance, 98-99% efficiency
**Fuzzy Logic:** Adaptive, handles rapid changes
";

pub(super) fn draft() -> Result<ModuleDraft, ImageRefError> {
    Ok(ModuleDraft {
        id: ModuleId::Solar,
        title: "Solar PV System".into(),
        icon: "🔆".into(),
        difficulty: Difficulty::Intermediate,
        task: "Select components in the order they would be assembled/connected in a complete solar PV system".into(),
        system_specs: spec_lines(SYSTEM_SPECS),
        overview_image: ImageRef::new("images/solar_system.png")?,
        components: components(COMPONENTS)?,
        reference_order: strings(REFERENCE_ORDER),
        explanation: strings(EXPLANATION),
        hint: hint(
            &[
                ("Light Entry Stage", "What touches sunlight first?"),
                ("Conversion Stage", "Where do photons become electrons?"),
                ("Collection Stage", "How is current gathered?"),
                ("Conditioning Stage", "How is power optimized and converted?"),
            ],
            "Photon → Electron → Current → Power → Grid",
            &[
                "Start with light entry components",
                "Then the semiconductor conversion",
                "Finally power conditioning systems",
            ],
            "Follow the electron flow from photon absorption to AC output!",
        ),
        analysis: analysis(&[
            ("Performance Characteristics", PERFORMANCE),
            ("Circuit Analysis", CIRCUIT),
        ]),
    })
}
