use crate::models::Mood;
use chrono::NaiveDate;

pub fn render_index(today: NaiveDate, entry_count: usize) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &today.format("%B %-d, %Y").to_string())
        .replace("{{ENTRY_COUNT}}", &entry_count.to_string())
        .replace("{{MOOD_BUTTONS}}", &mood_buttons())
        .replace("{{FILTER_OPTIONS}}", &filter_options())
}

fn mood_buttons() -> String {
    Mood::ALL
        .into_iter()
        .map(|mood| {
            format!(
                r#"<button class="mood" type="button" data-mood="{}"><span class="emoji">{}</span>{}</button>"#,
                mood.as_str(),
                mood.emoji(),
                mood.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn filter_options() -> String {
    std::iter::once(r#"<option value="all">All moods</option>"#.to_string())
        .chain(Mood::ALL.into_iter().map(|mood| {
            format!(r#"<option value="{}">{}</option>"#, mood.as_str(), mood.label())
        }))
        .collect::<Vec<_>>()
        .join("")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>MoodMate</title>
  <style>
    :root {
      --bg-1: #fde7c8;
      --bg-2: #f9b774;
      --ink: #2b2a28;
      --accent: #f97316;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(180deg, var(--bg-2), var(--bg-1) 60%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 { font-family: Georgia, serif; margin: 0; font-size: clamp(2rem, 4vw, 2.6rem); }
    h2 { margin: 0 0 12px; font-size: 1.3rem; }
    .subtitle { margin: 4px 0 0; color: #5f5c57; }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .moods { display: flex; flex-wrap: wrap; gap: 10px; }

    button, select {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    button.mood { display: inline-flex; align-items: center; gap: 6px; }
    button.mood .emoji { font-size: 1.4rem; }
    button.selected, .tab.active { background: var(--accent); color: white; }
    button.primary { background: var(--accent); color: white; width: 100%; margin-top: 12px; }

    textarea {
      width: 100%;
      margin-top: 14px;
      padding: 12px;
      border-radius: 14px;
      border: 1px solid #f3c89c;
      font: inherit;
      resize: vertical;
    }

    .weather { color: #6b645d; font-size: 0.95rem; }

    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 18px; }

    .calendar { display: grid; grid-template-columns: repeat(7, 1fr); gap: 4px; text-align: center; }
    .calendar .cell { min-height: 36px; border-radius: 10px; padding: 4px; font-size: 0.8rem; }
    .calendar .cell.filled { background: #fff1e0; }
    .calendar-nav { display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px; }

    .tabs { display: flex; gap: 6px; flex-wrap: wrap; margin-bottom: 12px; }

    .bar-row { display: grid; grid-template-columns: 90px 1fr 70px; gap: 10px; align-items: center; margin: 6px 0; }
    .bar { height: 14px; border-radius: 999px; background: var(--accent); }

    #trend { width: 100%; height: 220px; display: block; }
    .trend-line { fill: none; stroke: var(--accent); stroke-width: 3; }
    .trend-point { fill: white; stroke: var(--accent); stroke-width: 2; }
    .trend-label { fill: #7a746d; font-size: 11px; }

    .entries { list-style: none; margin: 0; padding: 0; display: grid; gap: 10px; }
    .entries li { border-bottom: 1px solid rgba(47, 72, 88, 0.08); padding-bottom: 8px; }
    .entries .meta { color: #7a746d; font-size: 0.85rem; }

    .toolbar { display: flex; gap: 8px; align-items: center; margin-bottom: 12px; }

    .status { min-height: 1.2em; font-size: 0.95rem; }
    .status[data-type="error"] { color: #c63b2b; }
    .status[data-type="success"] { color: #2d7a4b; }

    @keyframes rise {
      from { opacity: 0; transform: translateY(18px); }
      to { opacity: 1; transform: translateY(0); }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>MoodMate</h1>
      <p class="subtitle">{{DATE}} &middot; <span id="entry-count">{{ENTRY_COUNT}}</span> entries</p>
    </header>

    <div class="status" id="status"></div>

    <section class="grid">
      <div class="card">
        <h2>How are you feeling today?</h2>
        <div class="moods">
        {{MOOD_BUTTONS}}
        </div>
        <textarea id="note" rows="3" placeholder="Add a note..."></textarea>
        <button class="primary" id="save" type="button">Save</button>
        <p class="weather" id="weather">Checking the weather...</p>
      </div>

      <div class="card">
        <div class="calendar-nav">
          <button type="button" id="prev-month">&lsaquo;</button>
          <strong id="calendar-label"></strong>
          <button type="button" id="next-month">&rsaquo;</button>
        </div>
        <div class="calendar" id="calendar"></div>
      </div>
    </section>

    <section class="card">
      <div class="tabs">
        <button class="tab active" type="button" data-view="distribution">Distribution</button>
        <button class="tab" type="button" data-view="week">Week</button>
        <button class="tab" type="button" data-view="month">Month</button>
        <button class="tab" type="button" data-view="all-time">All time</button>
      </div>
      <div id="distribution"></div>
      <svg id="trend" viewBox="0 0 600 220" role="img" aria-label="Mood trend" hidden></svg>
    </section>

    <section class="card">
      <div class="toolbar">
        <h2 style="margin: 0; flex: 1">All notes</h2>
        <select id="filter">{{FILTER_OPTIONS}}</select>
        <button type="button" id="export">Export CSV</button>
      </div>
      <ul class="entries" id="entries"></ul>
    </section>
  </main>

  <script>
    const EMOJI = {};
    document.querySelectorAll('button.mood').forEach((button) => {
      EMOJI[button.dataset.mood] = button.querySelector('.emoji').textContent;
    });
    const MOODS = Object.keys(EMOJI);

    const statusEl = document.getElementById('status');
    const noteEl = document.getElementById('note');
    const filterEl = document.getElementById('filter');
    const trendEl = document.getElementById('trend');
    const distributionEl = document.getElementById('distribution');

    let selectedMood = null;
    let coords = null;
    let view = 'distribution';
    let shownMonth = new Date();

    const notify = (notices) => {
      if (!notices || !notices.length) return;
      const last = notices[notices.length - 1];
      statusEl.textContent = notices.map((n) => n.message).join(' ');
      statusEl.dataset.type = last.level;
      setTimeout(() => { statusEl.textContent = ''; }, 2500);
    };

    const fail = (message) => notify([{ level: 'error', message }]);

    const getJson = async (url, options) => {
      const res = await fetch(url, options);
      const body = await res.json().catch(() => ({}));
      if (!res.ok) throw new Error(body.error || `Request failed (${res.status})`);
      return body;
    };

    const coordQuery = () => coords ? `lat=${coords.lat}&lon=${coords.lon}` : '';

    const loadWeather = async () => {
      const data = await getJson(`/api/weather?${coordQuery()}`);
      const w = data.weather;
      document.getElementById('weather').textContent =
        `${w.location_name}: ${w.temperature}°C, ${w.condition}`;
      notify(data.notices);
    };

    const renderEntries = (entries) => {
      const list = document.getElementById('entries');
      list.innerHTML = '';
      if (!entries.length) {
        list.innerHTML = '<li class="meta">No entries yet.</li>';
        return;
      }
      entries.forEach((entry) => {
        const item = document.createElement('li');
        const meta = document.createElement('div');
        meta.className = 'meta';
        const when = new Date(entry.timestamp).toLocaleDateString('en-US', { month: 'long', day: 'numeric', year: 'numeric' });
        const weather = entry.weather ? ` · ${entry.weather.temperature}°C ${entry.weather.condition}, ${entry.weather.location_name}` : '';
        meta.textContent = `${EMOJI[entry.mood] || ''} ${entry.mood} · ${when}${weather}`;
        const note = document.createElement('div');
        note.textContent = entry.note;
        item.append(meta, note);
        list.appendChild(item);
      });
    };

    const loadEntries = async () => {
      renderEntries(await getJson(`/api/entries?mood=${filterEl.value}`));
    };

    const renderDistribution = (dist) => {
      distributionEl.innerHTML = '';
      MOODS.forEach((mood) => {
        const row = document.createElement('div');
        row.className = 'bar-row';
        const pct = dist.percentages[mood] || 0;
        row.innerHTML = `<span>${EMOJI[mood]} ${mood}</span><div class="bar" style="width:${pct}%"></div><span>${dist.counts[mood]} (${pct}%)</span>`;
        distributionEl.appendChild(row);
      });
    };

    const renderTrend = (points) => {
      if (!points.length) {
        trendEl.innerHTML = '<text class="trend-label" x="50%" y="50%" text-anchor="middle">No entries in this period</text>';
        return;
      }
      const width = 600, height = 220, padX = 40, padY = 26;
      const x = (i) => points.length === 1 ? width / 2 : padX + i * (width - padX * 2) / (points.length - 1);
      const y = (v) => height - padY - (v - 1) / 4 * (height - padY * 2);
      const path = points.map((p, i) => `${i ? 'L' : 'M'}${x(i)},${y(p.average_mood)}`).join(' ');
      const dots = points.map((p, i) =>
        `<circle class="trend-point" cx="${x(i)}" cy="${y(p.average_mood)}" r="4"><title>${p.display_label}: ${p.average_mood.toFixed(1)} (${p.entry_count})</title></circle>` +
        `<text class="trend-label" x="${x(i)}" y="${height - 6}" text-anchor="middle">${p.display_label}</text>`).join('');
      trendEl.innerHTML = `<path class="trend-line" d="${path}"></path>${dots}`;
    };

    const loadStats = async () => {
      const showTrend = view !== 'distribution';
      trendEl.hidden = !showTrend;
      distributionEl.hidden = showTrend;
      if (showTrend) {
        renderTrend(await getJson(`/api/stats/trend?period=${view}`));
      } else {
        renderDistribution(await getJson('/api/stats/distribution'));
      }
    };

    const loadCalendar = async () => {
      const data = await getJson(`/api/calendar?year=${shownMonth.getFullYear()}&month=${shownMonth.getMonth() + 1}`);
      document.getElementById('calendar-label').textContent = data.label;
      const grid = document.getElementById('calendar');
      grid.innerHTML = '';
      ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'].forEach((d) => {
        grid.insertAdjacentHTML('beforeend', `<div class="cell"><strong>${d}</strong></div>`);
      });
      for (let i = 0; i < data.leading_blanks; i++) grid.insertAdjacentHTML('beforeend', '<div class="cell"></div>');
      data.days.forEach((day) => {
        const mark = day.mood ? EMOJI[day.mood] : '';
        grid.insertAdjacentHTML('beforeend', `<div class="cell${day.mood ? ' filled' : ''}">${day.day}<br>${mark}</div>`);
      });
    };

    const refresh = () => Promise.all([loadEntries(), loadStats(), loadCalendar()]).catch((err) => fail(err.message));

    document.querySelectorAll('button.mood').forEach((button) => {
      button.addEventListener('click', () => {
        selectedMood = button.dataset.mood;
        document.querySelectorAll('button.mood').forEach((b) => b.classList.toggle('selected', b === button));
      });
    });

    document.getElementById('save').addEventListener('click', async () => {
      const payload = { mood: selectedMood, note: noteEl.value };
      if (coords) { payload.latitude = coords.lat; payload.longitude = coords.lon; }
      try {
        const data = await getJson('/api/entries', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(payload),
        });
        notify(data.notices);
        selectedMood = null;
        noteEl.value = '';
        document.querySelectorAll('button.mood').forEach((b) => b.classList.remove('selected'));
        const count = document.getElementById('entry-count');
        count.textContent = Number(count.textContent) + 1;
        refresh();
      } catch (err) {
        fail(err.message);
      }
    });

    document.querySelectorAll('.tab').forEach((tab) => {
      tab.addEventListener('click', () => {
        view = tab.dataset.view;
        document.querySelectorAll('.tab').forEach((t) => t.classList.toggle('active', t === tab));
        loadStats().catch((err) => fail(err.message));
      });
    });

    filterEl.addEventListener('change', () => loadEntries().catch((err) => fail(err.message)));

    document.getElementById('export').addEventListener('click', async () => {
      const res = await fetch(`/api/export?mood=${filterEl.value}`);
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        fail(body.error || 'Export failed');
        return;
      }
      const disposition = res.headers.get('Content-Disposition') || '';
      const match = disposition.match(/filename="([^"]+)"/);
      const url = URL.createObjectURL(await res.blob());
      const link = document.createElement('a');
      link.href = url;
      link.download = match ? match[1] : 'moodmate_export.csv';
      document.body.appendChild(link);
      link.click();
      link.remove();
      URL.revokeObjectURL(url);
      notify([{ level: 'success', message: 'Exported entries to CSV' }]);
    });

    const shiftMonth = (delta) => {
      shownMonth = new Date(shownMonth.getFullYear(), shownMonth.getMonth() + delta, 1);
      loadCalendar().catch((err) => fail(err.message));
    };
    document.getElementById('prev-month').addEventListener('click', () => shiftMonth(-1));
    document.getElementById('next-month').addEventListener('click', () => shiftMonth(1));

    const startWeather = () => loadWeather().catch((err) => fail(err.message));
    if (navigator.geolocation) {
      navigator.geolocation.getCurrentPosition(
        (pos) => { coords = { lat: pos.coords.latitude, lon: pos.coords.longitude }; startWeather(); },
        () => startWeather()
      );
    } else {
      startWeather();
    }

    refresh();
  </script>
</body>
</html>
"#;
